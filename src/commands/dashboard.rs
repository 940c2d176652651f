use anyhow::Result;

use lms_portal::models::{ClassFilter, ClassSession};
use lms_portal::pages::dashboards::{self, Dashboard};
use lms_portal::pages::ListView;

use super::{App, print_list, print_widget, truncate};

pub async fn run(app: &App, filter: ClassFilter) -> Result<()> {
    let dashboard = dashboards::for_session(app.page(), filter)
        .await
        .ok_or_else(|| app.denied())?;

    match dashboard {
        Dashboard::Admin(dash) => {
            println!("== Overview ==");
            print_widget(&dash.metrics, |m| {
                println!("Students:    {:>6}  ({:+.1}%)", m.total_students, m.student_growth);
                println!("Courses:     {:>6}  ({:+.1}%)", m.total_courses, m.course_drop);
                match m.instructor_growth {
                    Some(growth) => println!("Instructors: {:>6}  ({:+.1}%)", m.total_instructors, growth),
                    None => println!("Instructors: {:>6}", m.total_instructors),
                }
            });
            println!("\n== Today's classes ==");
            print_classes(&dash.todays_classes);
        }
        Dashboard::Instructor(dash) => {
            println!("== Overview ==");
            print_widget(&dash.metrics, |m| {
                println!("Assigned courses:  {:>5}  ({:+.1}%)", m.total_assigned_courses, m.courses_growth);
                println!("Active batches:    {:>5}  ({:+.1}%)", m.total_active_batches, m.batches_growth);
                println!("Enrolled students: {:>5}  ({:+.1}%)", m.total_enrolled_students, m.students_growth);
                println!("Upcoming classes:  {:>5}  ({:+.1}%)", m.upcoming_classes, m.classes_growth);
            });
            println!("\n== Classes ({}) ==", filter.as_str());
            print_classes(&dash.classes);
        }
        Dashboard::Student(dash) => {
            println!("== Overview ==");
            print_widget(&dash.metrics, |m| {
                println!("Enrolled courses:  {:>5}  ({:+.1}%)", m.enrolled_courses, m.enrollment_growth);
                println!("Completed courses: {:>5}  ({:+.1}%)", m.completed_courses, m.completion_growth);
                println!("Upcoming classes:  {:>5}  ({:+.1}%)", m.upcoming_classes, m.classes_growth);
                println!("Assignments done:  {:>4.0}%  ({:+.1}%)", m.assignment_completion, m.assignment_growth);
            });
            println!("\n== Classes ({}) ==", filter.as_str());
            print_classes(&dash.classes);

            println!("\n== Course progress ==");
            print_list(&dash.progress, "No courses in progress.", |p| {
                println!(
                    "{:<40} {:>5.1}%  {}/{} classes",
                    truncate(&p.title, 40),
                    p.progress_percentage,
                    p.completed_classes,
                    p.total_classes
                );
            });

            println!("\n== Assignments ==");
            print_list(&dash.assignments, "No assignments.", |a| {
                println!("{:<40} due {}  [{}]", truncate(&a.title, 40), a.due_date, a.status);
            });

            println!("\n== Recent activity ==");
            print_list(&dash.activities, "No recent activity.", |a| {
                println!("{}  {:<12} {}", a.timestamp, a.activity_type, a.description);
            });
        }
    }
    Ok(())
}

fn print_classes(classes: &ListView<ClassSession>) {
    print_list(classes, "No classes found.", |c| {
        println!(
            "#{:<4} {} {}-{}  {:<30} {:<20} [{}]{}",
            c.id,
            c.date,
            c.start_time,
            c.end_time,
            truncate(c.course_title(), 30),
            truncate(c.batch_name(), 20),
            c.class_status.label(),
            c.joinable_link()
                .map(|link| format!("  join: {}", link))
                .unwrap_or_default()
        );
    });
}
