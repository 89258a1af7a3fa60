mod common;

use common::{course, material, section};
use lms_client::models::{Course, MaterialCategory};
use lms_client::services::catalog::{
    discounted_price, filter_courses, greeting_for_hour, lesson_outline, price_label, truncate,
};

fn catalog() -> Vec<Course> {
    vec![
        Course {
            name: "Rust Basics".to_string(),
            level: "Beginner".to_string(),
            ..course("1")
        },
        Course {
            name: "Advanced Rust".to_string(),
            level: "Advance".to_string(),
            ..course("2")
        },
        Course {
            name: "Go Intermediate".to_string(),
            level: "Intermediate".to_string(),
            ..course("3")
        },
    ]
}

#[test]
fn test_filter_by_name_is_case_insensitive() {
    let courses = catalog();
    let found: Vec<&str> = filter_courses(&courses, "rUST", "All")
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(found, vec!["1", "2"]);
}

#[test]
fn test_filter_by_level() {
    let courses = catalog();

    let found: Vec<&str> = filter_courses(&courses, "", "Advance")
        .into_iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(found, vec!["2"]);

    assert!(filter_courses(&courses, "go", "Beginner").is_empty());
    assert_eq!(filter_courses(&courses, "", "").len(), 3);
}

#[test]
fn test_prices() {
    let discounted = Course {
        price: 200.0,
        discount: 25.0,
        ..course("1")
    };
    assert_eq!(discounted_price(&discounted), 150.0);
    assert_eq!(price_label(&discounted), "$150.00 (was $200, -25%)");

    let full = Course {
        price: 80.0,
        discount: 0.0,
        ..course("2")
    };
    assert_eq!(price_label(&full), "$80");

    let free = Course {
        price: 0.0,
        ..course("3")
    };
    assert_eq!(price_label(&free), "Free");
}

#[test]
fn test_lesson_outline_sorts_and_truncates() {
    let mut lab = material("lab", 2);
    lab.category = MaterialCategory::Lab;
    let mut lecture = material("lecture", 1);
    lecture.category = MaterialCategory::Lecture;

    let mut long = section("s2", 2, vec![lab, lecture]);
    long.section_name = "An exceptionally long chapter name here".to_string();
    long.duration = 25;
    let short = section("s1", 1, vec![material("intro", 1)]);

    let outline = lesson_outline(&[long, short]);

    assert_eq!(outline.len(), 2);
    assert_eq!(outline[0].title, "Chapter 1: Section s1");
    assert_eq!(outline[0].items[0].icon, "doc");
    assert_eq!(outline[1].title, "Chapter 2: An exceptionally long chapte...");
    assert_eq!(outline[1].duration, 25);

    let items: Vec<(&str, &str)> = outline[1]
        .items
        .iter()
        .map(|i| (i.material_id.as_str(), i.icon))
        .collect();
    assert_eq!(
        items,
        vec![("lecture", "rectangle.and.pencil.and.ellipsis"), ("lab", "flask.fill")]
    );
}

#[test]
fn test_truncate_counts_characters() {
    assert_eq!(truncate("short", 28), "short");
    assert_eq!(truncate("日本語のテキスト", 3), "日本語...");
}

#[test]
fn test_greeting_boundaries() {
    assert_eq!(greeting_for_hour(0), "Good Morning");
    assert_eq!(greeting_for_hour(11), "Good Morning");
    assert_eq!(greeting_for_hour(12), "Good Afternoon");
    assert_eq!(greeting_for_hour(17), "Good Afternoon");
    assert_eq!(greeting_for_hour(18), "Good Evening");
    assert_eq!(greeting_for_hour(23), "Good Evening");
}
