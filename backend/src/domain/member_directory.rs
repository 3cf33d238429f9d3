//! Member list search and filtering.

use shared::{EnrollmentStatus, Member};

/// Search box and dropdown selections on the members page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberFilter {
    /// Case-insensitive match against name, email or course
    pub search: Option<String>,
    pub status: Option<EnrollmentStatus>,
    /// Exact course name
    pub course: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct MemberDirectory;

impl MemberDirectory {
    pub fn new() -> Self {
        Self
    }

    pub fn filter<'a>(&self, members: &'a [Member], filter: &MemberFilter) -> Vec<&'a Member> {
        let needle = filter
            .search
            .as_deref()
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty());

        members
            .iter()
            .filter(|member| match &needle {
                Some(needle) => {
                    member.name.to_lowercase().contains(needle)
                        || member.email.to_lowercase().contains(needle)
                        || member.course.to_lowercase().contains(needle)
                }
                None => true,
            })
            .filter(|member| filter.status.map_or(true, |status| member.status == status))
            .filter(|member| filter.course.as_deref().map_or(true, |course| member.course == course))
            .collect()
    }

    /// Distinct course names in first-seen order, for the course dropdown
    pub fn unique_courses(&self, members: &[Member]) -> Vec<String> {
        let mut courses: Vec<String> = Vec::new();
        for member in members {
            if !courses.contains(&member.course) {
                courses.push(member.course.clone());
            }
        }
        courses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn member(id: &str, name: &str, course: &str, status: EnrollmentStatus) -> Member {
        Member {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@email.com", name.to_lowercase().replace(' ', ".")),
            phone: "+1234567890".to_string(),
            course: course.to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            status,
        }
    }

    fn members() -> Vec<Member> {
        vec![
            member("1", "Alice Johnson", "Mathematics", EnrollmentStatus::Active),
            member("2", "Bob Smith", "Physics", EnrollmentStatus::Active),
            member("3", "Carol Davis", "Chemistry", EnrollmentStatus::Active),
            member("4", "David Wilson", "Mathematics", EnrollmentStatus::Inactive),
        ]
    }

    fn ids(found: Vec<&Member>) -> Vec<&str> {
        found.into_iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let directory = MemberDirectory::new();
        let members = members();

        let by_name = MemberFilter { search: Some("ALICE".to_string()), ..MemberFilter::default() };
        assert_eq!(ids(directory.filter(&members, &by_name)), vec!["1"]);

        let by_email = MemberFilter { search: Some("bob.smith@".to_string()), ..MemberFilter::default() };
        assert_eq!(ids(directory.filter(&members, &by_email)), vec!["2"]);

        let by_course = MemberFilter { search: Some("math".to_string()), ..MemberFilter::default() };
        assert_eq!(ids(directory.filter(&members, &by_course)), vec!["1", "4"]);

        let blank = MemberFilter { search: Some("  ".to_string()), ..MemberFilter::default() };
        assert_eq!(directory.filter(&members, &blank).len(), 4);
    }

    #[test]
    fn test_status_and_course_filters_combine() {
        let directory = MemberDirectory::new();
        let members = members();

        let filter = MemberFilter {
            search: None,
            status: Some(EnrollmentStatus::Active),
            course: Some("Mathematics".to_string()),
        };
        assert_eq!(ids(directory.filter(&members, &filter)), vec!["1"]);
    }

    #[test]
    fn test_unique_courses() {
        let directory = MemberDirectory::new();
        assert_eq!(directory.unique_courses(&members()), vec!["Mathematics", "Physics", "Chemistry"]);
    }
}
