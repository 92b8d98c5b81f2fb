//! HTML pages

use std::fmt::Write;

use dns_onboarder_core::StatusSnapshot;
use dns_onboarder_core::utils::datetime::format_rfc3339;

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse}\
td,th{border:1px solid #ccc;padding:.3rem .6rem;text-align:left}";

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n\
         <body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n"
    )
}

/// 首页：active / pending 列表
pub fn render_index(snapshot: &StatusSnapshot) -> String {
    let mut body = String::new();

    body.push_str("<h2>Active domains</h2>\n");
    if snapshot.active.is_empty() {
        body.push_str("<p>No active domains.</p>\n");
    } else {
        body.push_str(
            "<table>\n<tr><th>Domain</th><th>Nameservers correct</th><th>Last checked</th></tr>\n",
        );
        for domain in &snapshot.active {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape_html(&domain.name),
                if domain.delegation_verified { "yes" } else { "no" },
                format_rfc3339(&domain.last_checked_at)
            );
        }
        body.push_str("</table>\n");
    }

    body.push_str("<h2>Pending domains</h2>\n");
    if snapshot.pending.is_empty() {
        body.push_str("<p>No pending domains.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for name in &snapshot.pending {
            let _ = writeln!(body, "<li>{}</li>", escape_html(name));
        }
        body.push_str("</ul>\n");
    }

    let _ = writeln!(
        body,
        "<p>{} domain(s) removed after losing delegation.</p>",
        snapshot.removed_count
    );
    body.push_str(
        "<p><a href=\"/submit\">Submit a domain</a> | <a href=\"/domains.json\">domains.json</a></p>\n",
    );

    page("Domain Manager", &body)
}

/// 提交页：表单和需要设置的 NS
pub fn render_submit(expected_nameservers: &[String]) -> String {
    let mut body = String::new();

    body.push_str(
        "<form method=\"post\" action=\"/submit\">\n\
         <label for=\"domain\">Domain</label>\n\
         <input type=\"text\" id=\"domain\" name=\"domain\" required>\n\
         <button type=\"submit\">Submit</button>\n\
         </form>\n",
    );

    body.push_str("<p>Point the domain's nameservers to, in this order:</p>\n<ol>\n");
    for ns in expected_nameservers {
        let _ = writeln!(body, "<li><code>{}</code></li>", escape_html(ns));
    }
    body.push_str("</ol>\n<p><a href=\"/\">Back</a></p>\n");

    page("Submit a domain", &body)
}
