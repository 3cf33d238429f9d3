//! Headline figures for the dashboard and analytics pages.

use chrono::NaiveDate;
use shared::{AttendanceRecord, AttendanceStatus, Course, CourseUtilization, DashboardStats, EnrollmentStatus, Member};

#[derive(Debug, Clone, Default)]
pub struct DashboardStatsService;

impl DashboardStatsService {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(
        &self,
        members: &[Member],
        attendance: &[AttendanceRecord],
        courses: &[Course],
        today: NaiveDate,
    ) -> DashboardStats {
        let todays_records: Vec<&AttendanceRecord> = attendance.iter().filter(|r| r.date == today).collect();

        DashboardStats {
            total_members: members.len(),
            active_members: members.iter().filter(|m| m.status == EnrollmentStatus::Active).count(),
            todays_attendance: todays_records.len(),
            todays_present: todays_records
                .iter()
                .filter(|r| r.status == AttendanceStatus::Present)
                .count(),
            total_courses: courses.len(),
            active_courses: courses.iter().filter(|c| c.status == EnrollmentStatus::Active).count(),
            total_enrollment: courses.iter().map(|c| c.students).sum(),
            projected_revenue: courses.iter().map(|c| c.fee * f64::from(c.students)).sum(),
            course_utilization: courses.iter().map(|c| self.course_utilization(c)).collect(),
        }
    }

    /// Enrollment as a percentage of capacity, rounded and clamped to 0..=100
    pub fn course_utilization(&self, course: &Course) -> CourseUtilization {
        let percentage = if course.max_students == 0 {
            0
        } else {
            let raw = (f64::from(course.students) / f64::from(course.max_students) * 100.0).round();
            raw.clamp(0.0, 100.0) as u32
        };

        CourseUtilization {
            name: course.name.clone(),
            students: course.students,
            capacity: course.max_students,
            percentage,
        }
    }
}
