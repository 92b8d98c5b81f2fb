//! 记录模板表解析
//!
//! 逗号分隔，每行 `type,name,content,ttl,proxied`。首行首字段为 `type` 时视为表头。
//! 表级错误（无法解析、各行字段数不一致）会让整张表失效；行级错误只跳过该行。

use crate::error::{CoreError, CoreResult};
use crate::types::{DnsRecordType, RecordRowError, RecordTemplate};

/// 每行期望的字段数
const FIELDS_PER_ROW: usize = 5;

/// 解析后的记录模板表
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    rows: Vec<Result<RecordTemplate, RecordRowError>>,
}

impl RecordTable {
    /// 解析整张表
    pub fn parse(input: &str) -> CoreResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(input.as_bytes());

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| CoreError::RecordTableError(e.to_string()))?;
            records.push(record);
        }

        let has_header = records.first().is_some_and(|r| r.get(0) == Some("type"));

        let rows = records
            .iter()
            .enumerate()
            .skip(usize::from(has_header))
            .map(|(idx, record)| parse_row(idx + 1, record))
            .collect();

        Ok(Self { rows })
    }

    /// 所有数据行（不含表头）的校验结果，保持表中顺序
    pub fn rows(&self) -> &[Result<RecordTemplate, RecordRowError>] {
        &self.rows
    }
}

fn parse_row(row: usize, record: &csv::StringRecord) -> Result<RecordTemplate, RecordRowError> {
    if record.len() != FIELDS_PER_ROW {
        return Err(RecordRowError::FieldCount {
            row,
            found: record.len(),
        });
    }

    let field = |i: usize| record.get(i).unwrap_or_default();

    let ttl = field(3)
        .parse::<u32>()
        .map_err(|_| RecordRowError::InvalidTtl {
            row,
            value: field(3).to_string(),
        })?;

    let proxied = parse_bool(field(4)).ok_or_else(|| RecordRowError::InvalidProxied {
        row,
        value: field(4).to_string(),
    })?;

    let record_type = field(0)
        .parse::<DnsRecordType>()
        .map_err(|_| RecordRowError::UnsupportedType {
            row,
            value: field(0).to_string(),
        })?;

    Ok(RecordTemplate {
        record_type,
        name: field(1).to_string(),
        content: field(2).to_string(),
        ttl,
        proxied,
    })
}

/// `true/false/1/0/t/f`，不区分大小写
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}
