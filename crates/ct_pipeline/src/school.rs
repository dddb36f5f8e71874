//! School state: roster, anonymous score lists, test tallies, and cached results.
//!
//! Two independent tally paths feed `num_tests`:
//! - `add_anon_scores` adds the length of each attached list;
//! - `calculate_test_nums` adds one per (subject, grade) of every enrolled student.
//! Neither clears the other. Calling both for the same scores counts them twice;
//! avoiding that is the caller's job.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use ct_algo::{build_pool, select_top, weighted_total, Contributor, SubjectSums};
use ct_core::{Grade, Level, Params, SchoolName, Score, Student, Subject, Test};
use tracing::debug;

use crate::{PipelineError, PipelineResult};

/// Selected contributors for one subject and their summed score.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubjectResult {
    pub contributors: Vec<Contributor>,
    pub sum: i64,
}

/// One competing school. Identity (equality, hashing, ordering) is the name alone.
#[derive(Clone, Debug)]
pub struct School {
    name: SchoolName,
    level: Level,
    students: Vec<Student>,
    num_tests: BTreeMap<Test, u32>,
    top_scores: BTreeMap<Subject, SubjectResult>,
    anon_scores: BTreeMap<Test, Vec<Score>>,
    total_score: Option<i64>,
}

impl School {
    pub fn new(name: SchoolName, level: Level) -> Self {
        Self {
            name,
            level,
            students: Vec::new(),
            num_tests: BTreeMap::new(),
            top_scores: BTreeMap::new(),
            anon_scores: BTreeMap::new(),
            total_score: None,
        }
    }

    pub fn name(&self) -> &SchoolName { &self.name }

    pub fn level(&self) -> Level { self.level }

    pub fn low_grade(&self) -> Grade { self.level.low_grade() }

    pub fn high_grade(&self) -> Grade { self.level.high_grade() }

    // ----------------------------- Roster & anonymous lists -----------------------------

    /// Enroll a student; returns the roster index used by `Contributor::Enrolled`.
    pub fn add_student(&mut self, student: Student) -> usize {
        self.students.push(student);
        self.students.len() - 1
    }

    pub fn students(&self) -> &[Student] { &self.students }

    pub fn num_students(&self) -> usize { self.students.len() }

    /// Roster indices of students whose grade lies outside this school's level.
    pub fn out_of_range_students(&self) -> Vec<usize> {
        self.students
            .iter()
            .enumerate()
            .filter(|(_, s)| !self.level.contains_grade(s.grade))
            .map(|(i, _)| i)
            .collect()
    }

    /// Attach the anonymous score list for `test`, replacing any earlier list,
    /// and add its length to the test's tally.
    pub fn add_anon_scores(&mut self, test: Test, scores: Vec<Score>) {
        let added = u32::try_from(scores.len()).unwrap_or(u32::MAX);
        let tally = self.num_tests.entry(test).or_insert(0);
        *tally = tally.saturating_add(added);
        self.anon_scores.insert(test, scores);
    }

    pub fn anon_scores(&self, test: &Test) -> Option<&[Score]> {
        self.anon_scores.get(test).map(Vec::as_slice)
    }

    pub fn all_anon_scores(&self) -> &BTreeMap<Test, Vec<Score>> { &self.anon_scores }

    // ----------------------------------- Tallies -----------------------------------

    /// Add one to the tally of every (subject, grade) an enrolled student has a
    /// score for. Earlier counts are kept.
    pub fn calculate_test_nums(&mut self) {
        for student in &self.students {
            for &subject in student.scores.keys() {
                match Test::new(subject, student.grade) {
                    Ok(test) => {
                        let tally = self.num_tests.entry(test).or_insert(0);
                        *tally = tally.saturating_add(1);
                    }
                    Err(e) => {
                        debug!(school = %self.name, student = %student.name, error = %e,
                               "student grade has no test; not tallied");
                    }
                }
            }
        }
    }

    pub fn num_tests(&self) -> &BTreeMap<Test, u32> { &self.num_tests }

    pub fn num_tests_for(&self, test: &Test) -> u32 {
        self.num_tests.get(test).copied().unwrap_or(0)
    }

    // ----------------------------------- Scoring -----------------------------------

    /// Build the pool for `subject`, select the team, and store the result,
    /// overwriting any earlier result for that subject.
    pub fn calculate_score(&mut self, subject: Subject, params: &Params) -> &SubjectResult {
        let pool = build_pool(subject, &self.students, &self.anon_scores, self.level);
        let pool_len = pool.len();
        let sel = select_top(pool, self.high_grade(), params);
        debug!(
            school = %self.name,
            subject = %subject,
            pool = pool_len,
            selected = sel.contributors.len(),
            sum = sel.sum,
            "subject scored"
        );

        let result = SubjectResult { contributors: sel.contributors, sum: sel.sum };
        self.top_scores.insert(subject, result);
        &self.top_scores[&subject]
    }

    /// Combine the stored subject sums into the school total.
    ///
    /// Fails with `MissingSubject` if any subject has not been scored.
    pub fn aggregate(&mut self) -> PipelineResult<i64> {
        let sums: SubjectSums = self.top_scores.iter().map(|(&s, r)| (s, r.sum)).collect();
        let total = weighted_total(self.level, &sums)?;
        debug!(school = %self.name, level = %self.level, total, "school total aggregated");
        self.total_score = Some(total);
        Ok(total)
    }

    /// Score every subject, then aggregate.
    pub fn calculate_scores(&mut self, params: &Params) -> PipelineResult<i64> {
        for subject in Subject::ALL {
            self.calculate_score(subject, params);
        }
        self.aggregate()
    }

    // ----------------------------------- Results -----------------------------------

    pub fn subject_result(&self, subject: Subject) -> PipelineResult<&SubjectResult> {
        self.top_scores.get(&subject).ok_or(PipelineError::NotScored(subject))
    }

    pub fn score(&self, subject: Subject) -> PipelineResult<i64> {
        self.subject_result(subject).map(|r| r.sum)
    }

    pub fn score_contributors(&self, subject: Subject) -> PipelineResult<&[Contributor]> {
        self.subject_result(subject).map(|r| r.contributors.as_slice())
    }

    pub fn total_score(&self) -> PipelineResult<i64> {
        self.total_score.ok_or(PipelineError::NotAggregated)
    }

    /// Resolve a selected contributor to a display label.
    pub fn contributor_label(&self, c: &Contributor) -> String {
        match c.student_index().and_then(|i| self.students.get(i)) {
            Some(st) => st.name.clone(),
            None => format!("anonymous (grade {})", c.grade()),
        }
    }
}

impl PartialEq for School {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for School {}

impl Hash for School {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for School {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for School {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for School {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.total_score {
            Some(t) => write!(f, "{} ({}): total {}", self.name, self.level, t),
            None => write!(f, "{} ({}): unscored", self.name, self.level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn name(s: &str) -> SchoolName { s.parse().expect("name") }
    fn test(s: &str) -> Test { s.parse().expect("test") }
    fn scores(xs: &[i32]) -> Vec<Score> { xs.iter().copied().map(Score::new).collect() }

    #[test]
    fn equality_and_hash_by_name_only() {
        let a = School::new(name("Lamar"), Level::Middle);
        let mut b = School::new(name("Lamar"), Level::High);
        b.add_student(Student::new("x", 9));
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
        assert!(set.insert(School::new(name("Lamar HS"), Level::High)));
    }

    #[test]
    fn results_absent_before_scoring() {
        let s = School::new(name("A"), Level::Middle);
        assert_eq!(s.score(Subject::N), Err(PipelineError::NotScored(Subject::N)));
        assert!(s.score_contributors(Subject::S).is_err());
        assert_eq!(s.total_score(), Err(PipelineError::NotAggregated));
        assert_eq!(s.to_string(), "A (middle): unscored");
    }

    #[test]
    fn aggregate_requires_every_subject() {
        let mut s = School::new(name("A"), Level::Middle);
        let p = Params::default();
        s.calculate_score(Subject::N, &p);
        s.calculate_score(Subject::C, &p);
        s.calculate_score(Subject::M, &p);
        assert_eq!(s.aggregate(), Err(PipelineError::MissingSubject(Subject::S)));
        assert_eq!(s.total_score(), Err(PipelineError::NotAggregated));
        s.calculate_score(Subject::S, &p);
        assert_eq!(s.aggregate(), Ok(0));
    }

    #[test]
    fn bulk_attach_replaces_list_and_accumulates_tally() {
        let mut s = School::new(name("A"), Level::Middle);
        s.add_anon_scores(test("N7"), scores(&[1, 2, 3]));
        s.add_anon_scores(test("N7"), scores(&[9]));
        assert_eq!(s.anon_scores(&test("N7")), Some(&scores(&[9])[..]));
        assert_eq!(s.num_tests_for(&test("N7")), 4);
        assert_eq!(s.anon_scores(&test("N8")), None);
    }

    #[test]
    fn recompute_tally_adds_to_bulk_counts() {
        let mut s = School::new(name("A"), Level::Middle);
        s.add_anon_scores(test("M8"), scores(&[5, 6]));
        s.add_student(Student::new("a", 8).with_score(Subject::M, 40).with_score(Subject::N, -1));
        s.add_student(Student::new("b", 7).with_score(Subject::M, 12));
        s.calculate_test_nums();
        assert_eq!(s.num_tests_for(&test("M8")), 3);
        assert_eq!(s.num_tests_for(&test("M7")), 1);
        // Any recorded score counts as a test taken, including negative ones.
        assert_eq!(s.num_tests_for(&test("N8")), 1);

        // Not idempotent: a second scan counts again.
        s.calculate_test_nums();
        assert_eq!(s.num_tests_for(&test("M8")), 4);
    }

    #[test]
    fn rescoring_overwrites_subject_result() {
        let mut s = School::new(name("A"), Level::Middle);
        let p = Params::default();
        s.add_student(Student::new("a", 8).with_score(Subject::C, 10));
        assert_eq!(s.calculate_score(Subject::C, &p).sum, 10);
        s.add_anon_scores(test("C6"), scores(&[7]));
        assert_eq!(s.calculate_score(Subject::C, &p).sum, 17);
        assert_eq!(s.score(Subject::C), Ok(17));
    }

    #[test]
    fn anonymous_contributors_never_join_roster() {
        let mut s = School::new(name("A"), Level::High);
        s.add_anon_scores(test("S10"), scores(&[50, 40]));
        s.calculate_scores(&Params::default()).unwrap();
        assert_eq!(s.num_students(), 0);
        assert_eq!(s.score_contributors(Subject::S).unwrap().len(), 2);
        assert_eq!(s.num_tests_for(&test("S10")), 2);
    }

    #[test]
    fn labels_resolve_names_and_anonymous_grades() {
        let mut s = School::new(name("A"), Level::Middle);
        s.add_student(Student::new("Ada", 8).with_score(Subject::N, 30));
        s.add_anon_scores(test("N6"), scores(&[20]));
        s.calculate_score(Subject::N, &Params::default());
        let labels: Vec<String> = s
            .score_contributors(Subject::N)
            .unwrap()
            .iter()
            .map(|c| s.contributor_label(c))
            .collect();
        assert_eq!(labels, vec!["Ada".to_string(), "anonymous (grade 6)".to_string()]);
    }

    #[test]
    fn out_of_range_students_reported() {
        let mut s = School::new(name("A"), Level::Middle);
        s.add_student(Student::new("ok", 7));
        s.add_student(Student::new("hs", 10));
        assert_eq!(s.out_of_range_students(), vec![1]);
    }
}
