use super::types::Teacher;
use serde::{Deserialize, Serialize};

/// Optional criteria, all of which must hold. Blank strings are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherFilter {
    /// Case-insensitive substring of the full name
    pub name: Option<String>,
    /// Case-insensitive exact grade
    pub grade: Option<String>,
    pub min_hourly_load: Option<u32>,
    pub max_hourly_load: Option<u32>,
}

impl TeacherFilter {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn min_hourly_load(mut self, min: u32) -> Self {
        self.min_hourly_load = Some(min);
        self
    }

    pub fn max_hourly_load(mut self, max: u32) -> Self {
        self.max_hourly_load = Some(max);
        self
    }

    pub fn is_empty(&self) -> bool {
        non_blank(&self.name).is_none()
            && non_blank(&self.grade).is_none()
            && self.min_hourly_load.is_none()
            && self.max_hourly_load.is_none()
    }

    pub fn matches(&self, teacher: &Teacher) -> bool {
        let name_ok = non_blank(&self.name)
            .map_or(true, |name| teacher.full_name.to_lowercase().contains(&name.to_lowercase()));
        let grade_ok = non_blank(&self.grade)
            .map_or(true, |grade| teacher.grade.to_lowercase() == grade.to_lowercase());
        let min_ok = self.min_hourly_load.map_or(true, |min| teacher.hourly_load >= min);
        let max_ok = self.max_hourly_load.map_or(true, |max| teacher.hourly_load <= max);
        name_ok && grade_ok && min_ok && max_ok
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Teachers satisfying `filter`, in roster order.
pub fn search_teachers<'a>(teachers: &'a [Teacher], filter: &'a TeacherFilter) -> impl Iterator<Item = &'a Teacher> + 'a {
    teachers.iter().filter(move |teacher| filter.matches(teacher))
}
