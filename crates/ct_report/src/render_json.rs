//! Report JSON renderer.
//!
//! Key order is the insertion order of `serde_json::Map` (crate is built with
//! `serde_json/preserve_order`): title → input_sha256 → levels, and inside each
//! school row rank → school → total → subjects → tests.

use serde_json::{Map as JsonMap, Value};

use crate::{ContributorRow, LevelSection, ReportModel, SchoolRow, SubjectRow};

/// Build the report object in fixed section order.
pub fn render_json(m: &ReportModel) -> Value {
    let mut root = obj();
    root.insert("title".into(), Value::String(m.title.clone()));
    root.insert("input_sha256".into(), Value::String(m.input_sha256.clone()));
    root.insert("levels".into(), Value::Array(m.levels.iter().map(level_json).collect()));
    Value::Object(root)
}

fn level_json(l: &LevelSection) -> Value {
    let mut o = obj();
    o.insert("level".into(), Value::String(l.level.token().into()));
    o.insert("schools".into(), Value::Array(l.rows.iter().map(school_json).collect()));
    Value::Object(o)
}

fn school_json(r: &SchoolRow) -> Value {
    let mut o = obj();
    o.insert("rank".into(), Value::from(r.rank));
    o.insert("school".into(), Value::String(r.school.clone()));
    o.insert("total".into(), Value::from(r.total));
    o.insert("subjects".into(), Value::Array(r.subjects.iter().map(subject_json).collect()));

    let mut tests = obj();
    for (t, n) in &r.tests {
        tests.insert(t.clone(), Value::from(*n));
    }
    o.insert("tests".into(), Value::Object(tests));
    Value::Object(o)
}

fn subject_json(s: &SubjectRow) -> Value {
    let mut o = obj();
    o.insert("subject".into(), Value::String(s.subject.token().into()));
    o.insert("sum".into(), Value::from(s.sum));
    o.insert("contributors".into(), Value::Array(s.contributors.iter().map(contributor_json).collect()));
    Value::Object(o)
}

fn contributor_json(c: &ContributorRow) -> Value {
    let mut o = obj();
    o.insert("label".into(), Value::String(c.label.clone()));
    o.insert("grade".into(), Value::from(c.grade));
    o.insert("score".into(), Value::from(c.score));
    Value::Object(o)
}

#[inline]
fn obj() -> JsonMap<String, Value> {
    JsonMap::new()
}
