//! Deterministic, offline HTML renderer.
//!
//! One page, no external assets. Every user-supplied string (school and
//! student names) goes through `esc`. Section order matches the JSON report.

use std::fmt::Write as _;

use crate::{LevelSection, ReportModel, SchoolRow};

/// Escape text for HTML (minimal, deterministic).
fn esc(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

struct HtmlBuilder {
    buf: String,
}

impl HtmlBuilder {
    fn new() -> Self {
        Self { buf: String::with_capacity(16 * 1024) }
    }

    fn start(&mut self, title: &str) {
        let _ = write!(
            self.buf,
            "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">\
             <title>{}</title>\
             <style>\
             body{{font-family:system-ui,Arial,sans-serif;margin:24px;}}\
             table{{border-collapse:collapse;margin-bottom:1em}}\
             td,th{{padding:4px 8px;border-bottom:1px solid #ddd;text-align:left;vertical-align:top}}\
             .muted{{opacity:0.8}}\
             </style></head><body><h1>{}</h1>",
            esc(title),
            esc(title)
        );
    }

    fn integrity(&mut self, input_sha256: &str) {
        let _ = write!(self.buf, "<p class=\"muted\">Input SHA-256: <code>{}</code></p>", esc(input_sha256));
    }

    fn level(&mut self, section: &LevelSection) {
        let level = section.level;
        let _ = write!(
            self.buf,
            "<h2>{} (grades {}&ndash;{})</h2>\
             <table><tr><th>Rank</th><th>School</th><th>Total</th>",
            esc(level.token()),
            level.low_grade(),
            level.high_grade()
        );
        if let Some(first) = section.rows.first() {
            for s in &first.subjects {
                let _ = write!(self.buf, "<th>{}</th>", esc(s.subject.title()));
            }
        }
        self.buf.push_str("<th>Tests</th></tr>");
        for row in &section.rows {
            self.row(row);
        }
        self.buf.push_str("</table>");
    }

    fn row(&mut self, r: &SchoolRow) {
        let _ = write!(self.buf, "<tr><td>{}</td><td>{}</td><td><b>{}</b></td>", r.rank, esc(&r.school), r.total);
        for s in &r.subjects {
            let _ = write!(self.buf, "<td><b>{}</b>", s.sum);
            for c in &s.contributors {
                let _ = write!(self.buf, "<br><span class=\"muted\">{} ({})</span>", esc(&c.label), c.score);
            }
            self.buf.push_str("</td>");
        }
        self.buf.push_str("<td>");
        for (i, (t, n)) in r.tests.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(", ");
            }
            let _ = write!(self.buf, "{}: {}", esc(t), n);
        }
        self.buf.push_str("</td></tr>");
    }

    fn finish(mut self) -> String {
        self.buf.push_str("</body></html>");
        self.buf
    }
}

/// Render the whole report as a single HTML document.
pub fn render_html(model: &ReportModel) -> String {
    let mut h = HtmlBuilder::new();
    h.start(&model.title);
    h.integrity(&model.input_sha256);
    for section in &model.levels {
        h.level(section);
    }
    h.finish()
}
