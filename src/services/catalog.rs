use chrono::Timelike;

use crate::models::{Course, Section};

pub const LEVEL_FILTERS: [&str; 4] = ["All", "Beginner", "Intermediate", "Advance"];
const CHAPTER_TITLE_MAX: usize = 28;

/// Courses whose name contains `query` (case-insensitive) and whose level
/// matches `level`; `"All"` or an empty level matches everything.
pub fn filter_courses<'a>(courses: &'a [Course], query: &str, level: &str) -> Vec<&'a Course> {
    let query = query.to_lowercase();
    courses
        .iter()
        .filter(|course| course.name.to_lowercase().contains(&query))
        .filter(|course| level.is_empty() || level == "All" || course.level == level)
        .collect()
}

pub fn discounted_price(course: &Course) -> f64 {
    course.price * (1.0 - course.discount / 100.0)
}

/// Price line for a course card.
pub fn price_label(course: &Course) -> String {
    if course.discount > 0.0 {
        format!(
            "${:.2} (was ${}, -{}%)",
            discounted_price(course),
            course.price,
            course.discount
        )
    } else if course.price > 0.0 {
        format!("${}", course.price)
    } else {
        "Free".to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineChapter {
    pub title: String,
    pub duration: u32,
    pub items: Vec<OutlineItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineItem {
    pub material_id: String,
    pub name: String,
    pub icon: &'static str,
}

/// The lessons tab: chapters by `order_number`, materials by `order_num`.
pub fn lesson_outline(sections: &[Section]) -> Vec<OutlineChapter> {
    let mut sections: Vec<&Section> = sections.iter().collect();
    sections.sort_by_key(|s| s.order_number);

    sections
        .into_iter()
        .map(|section| {
            let mut materials: Vec<_> = section.course_materials.iter().collect();
            materials.sort_by_key(|m| m.order_num);

            OutlineChapter {
                title: format!(
                    "Chapter {}: {}",
                    section.order_number,
                    truncate(&section.section_name, CHAPTER_TITLE_MAX)
                ),
                duration: section.duration,
                items: materials
                    .into_iter()
                    .map(|m| OutlineItem {
                        material_id: m.id.clone(),
                        name: m.name.clone(),
                        icon: m.category.icon(),
                    })
                    .collect(),
            }
        })
        .collect()
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

pub fn greeting_for_hour(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 18 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

pub fn greeting_now() -> &'static str {
    greeting_for_hour(chrono::Local::now().hour())
}
