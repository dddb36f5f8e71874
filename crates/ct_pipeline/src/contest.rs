//! Contest batch: every school of one contest, scored independently and ranked
//! per level.

use std::collections::BTreeMap;

use ct_core::{Level, Params, SchoolName};
use tracing::{info, warn};

use crate::school::School;
use crate::{PipelineError, PipelineResult};

/// One row of a level's standings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    /// Competition rank: equal totals share a rank and the next rank skips.
    pub rank: usize,
    pub name: SchoolName,
    pub total: i64,
}

/// Schools keyed by name (canonical order).
#[derive(Clone, Debug, Default)]
pub struct Contest {
    schools: BTreeMap<SchoolName, School>,
}

impl Contest {
    pub fn new() -> Self { Self::default() }

    /// Add a school; a second school with the same name is rejected.
    pub fn add_school(&mut self, school: School) -> PipelineResult<()> {
        if self.schools.contains_key(school.name()) {
            return Err(PipelineError::DuplicateSchool(school.name().to_string()));
        }
        self.schools.insert(school.name().clone(), school);
        Ok(())
    }

    pub fn school(&self, name: &SchoolName) -> Option<&School> { self.schools.get(name) }

    pub fn school_mut(&mut self, name: &SchoolName) -> Option<&mut School> { self.schools.get_mut(name) }

    /// Schools in name order.
    pub fn schools(&self) -> impl Iterator<Item = &School> { self.schools.values() }

    pub fn len(&self) -> usize { self.schools.len() }

    pub fn is_empty(&self) -> bool { self.schools.is_empty() }

    /// Levels that have at least one school, in `Level::ALL` order.
    pub fn levels(&self) -> Vec<Level> {
        Level::ALL
            .into_iter()
            .filter(|l| self.schools.values().any(|s| s.level() == *l))
            .collect()
    }

    /// Score every school (name order). Parameters are validated first.
    pub fn score_all(&mut self, params: &Params) -> PipelineResult<()> {
        params.validate_domains()?;
        for school in self.schools.values_mut() {
            for idx in school.out_of_range_students() {
                let st = &school.students()[idx];
                warn!(
                    school = %school.name(),
                    student = %st.name,
                    grade = st.grade,
                    level = %school.level(),
                    "student grade outside level range"
                );
            }
            school.calculate_scores(params)?;
        }
        info!(schools = self.schools.len(), "contest scored");
        Ok(())
    }

    /// Standings for `level`: total descending, then name ascending.
    ///
    /// Every school of the level must have been aggregated.
    pub fn standings(&self, level: Level) -> PipelineResult<Vec<Standing>> {
        let mut rows: Vec<(SchoolName, i64)> = Vec::new();
        for school in self.schools.values().filter(|s| s.level() == level) {
            rows.push((school.name().clone(), school.total_score()?));
        }
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut out: Vec<Standing> = Vec::with_capacity(rows.len());
        for (i, (name, total)) in rows.into_iter().enumerate() {
            let rank = match out.last() {
                Some(prev) if prev.total == total => prev.rank,
                _ => i + 1,
            };
            out.push(Standing { rank, name, total });
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ct_core::{Score, Student, Subject, Test};

    fn name(s: &str) -> SchoolName { s.parse().expect("name") }

    fn school_with_n(n: &str, level: Level, n_score: i32) -> School {
        let mut s = School::new(name(n), level);
        let grade = level.low_grade();
        s.add_student(Student::new("solo", grade).with_score(Subject::N, n_score));
        s
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut c = Contest::new();
        c.add_school(School::new(name("A"), Level::Middle)).unwrap();
        let err = c.add_school(School::new(name("A"), Level::High)).unwrap_err();
        assert_eq!(err, PipelineError::DuplicateSchool("A".into()));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn standings_rank_ties_share_rank() {
        let mut c = Contest::new();
        c.add_school(school_with_n("B", Level::Middle, 50)).unwrap();
        c.add_school(school_with_n("A", Level::Middle, 50)).unwrap();
        c.add_school(school_with_n("C", Level::Middle, 70)).unwrap();
        c.add_school(school_with_n("D", Level::Middle, 10)).unwrap();
        c.add_school(school_with_n("H", Level::High, 99)).unwrap();
        c.score_all(&Params::default()).unwrap();

        let rows = c.standings(Level::Middle).unwrap();
        let got: Vec<(usize, &str, i64)> =
            rows.iter().map(|r| (r.rank, r.name.as_str(), r.total)).collect();
        assert_eq!(got, vec![(1, "C", 70), (2, "A", 50), (2, "B", 50), (4, "D", 10)]);

        let high = c.standings(Level::High).unwrap();
        assert_eq!(high.len(), 1);
        assert_eq!(c.levels(), vec![Level::Middle, Level::High]);
    }

    #[test]
    fn standings_require_scoring() {
        let mut c = Contest::new();
        c.add_school(school_with_n("A", Level::High, 1)).unwrap();
        assert_eq!(c.standings(Level::High), Err(PipelineError::NotAggregated));
        assert_eq!(c.standings(Level::Middle), Ok(vec![]));
    }

    #[test]
    fn invalid_params_rejected_before_scoring() {
        let mut c = Contest::new();
        c.add_school(school_with_n("A", Level::High, 1)).unwrap();
        let bad = Params { team_size: 2, top_grade_cap: 5 };
        assert!(matches!(c.score_all(&bad), Err(PipelineError::Params(_))));
        assert!(c.school(&name("A")).unwrap().total_score().is_err());
    }

    #[test]
    fn school_mut_allows_late_anonymous_lists() {
        let mut c = Contest::new();
        c.add_school(School::new(name("A"), Level::Middle)).unwrap();
        let t: Test = "S8".parse().unwrap();
        c.school_mut(&name("A")).unwrap().add_anon_scores(t, vec![Score::new(10)]);
        c.score_all(&Params::default()).unwrap();
        // 10·8/5 = 16
        assert_eq!(c.school(&name("A")).unwrap().total_score(), Ok(16));
    }
}
