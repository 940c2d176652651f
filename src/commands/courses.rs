use anyhow::{Result, bail};

use lms_portal::pages::WidgetState;
use lms_portal::pages::courses::{CourseForm, CoursesPage};

use super::{App, finish, print_list, truncate};

/// Values given on the command line. Unset fields keep whatever the form
/// already holds.
pub struct CourseFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<i64>,
    pub category: Option<i64>,
    pub weeks: Option<u32>,
    pub syllabus: Vec<String>,
}

impl CourseFields {
    fn apply(self, form: &mut CourseForm) {
        if let Some(title) = self.title {
            form.title = title;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(instructor) = self.instructor {
            form.instructor_id = instructor.to_string();
        }
        if let Some(category) = self.category {
            form.category_id = category.to_string();
        }
        if let Some(weeks) = self.weeks {
            form.duration_weeks = weeks.to_string();
        }
        if !self.syllabus.is_empty() {
            form.syllabus = self.syllabus.join("\n");
        }
    }
}

fn mount(app: &App) -> Result<CoursesPage<'_>> {
    CoursesPage::mount(app.page(), app.area()).ok_or_else(|| app.denied())
}

pub async fn list(app: &App) -> Result<()> {
    let page = mount(app)?;
    print_list(&page.load().await, "No courses found.", |course| {
        println!(
            "#{:<4} {:<36} {:<20} {:<16} {}",
            course.id,
            truncate(&course.title, 36),
            truncate(course.instructor_name(), 20),
            truncate(course.category_name(), 16),
            course
                .duration_weeks
                .map(|w| format!("{} weeks", w))
                .unwrap_or_default()
        );
    });
    Ok(())
}

pub async fn show(app: &App, id: i64) -> Result<()> {
    let page = mount(app)?;
    let course = match page.load_one(id).await {
        WidgetState::Ready(course) => course,
        WidgetState::Failed(message) => bail!(message),
        WidgetState::Loading => return Ok(()),
    };

    println!("Course #{}: {}", course.id, course.title);
    println!("Instructor: {}", course.instructor_name());
    println!("Category: {}", course.category_name());
    if let Some(weeks) = course.duration_weeks {
        println!("Duration: {} weeks", weeks);
    }
    if let Some(desc) = course.description.as_deref().filter(|d| !d.is_empty()) {
        println!("\nDescription:");
        for line in desc.lines() {
            println!("  {}", line);
        }
    }
    if !course.syllabus.is_empty() {
        println!("\nSyllabus:");
        for (i, entry) in course.syllabus.iter().enumerate() {
            println!("  {}. {}", i + 1, entry);
        }
    }
    Ok(())
}

pub async fn create(app: &App, fields: CourseFields) -> Result<()> {
    let page = mount(app)?;
    let mut form = CourseForm::default();
    fields.apply(&mut form);
    finish(page.create(&form).await, "Course created.")
}

pub async fn edit(app: &App, id: i64, fields: CourseFields) -> Result<()> {
    let page = mount(app)?;
    let editor = page.editor(id).await;
    if let WidgetState::Failed(message) = &editor.course {
        bail!(message.clone());
    }
    let mut form = editor.form;
    fields.apply(&mut form);
    finish(page.update(id, &form).await, "Course updated.")
}
