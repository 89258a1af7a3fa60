//! Merges a course record with its separately fetched sections.

use crate::lms::dto::{RawMaterial, RawSection};
use crate::models::{Course, Material, Section};

/// Attaches `raw_sections` to `course`, keeping upstream section order.
pub fn assemble_course(mut course: Course, raw_sections: Vec<RawSection>) -> Course {
    let sections = raw_sections.into_iter().map(map_section).collect();
    course.sections = Some(sections);
    course
}

pub fn map_section(raw: RawSection) -> Section {
    let duration = section_duration(&raw.course_materials);
    Section {
        section_id: raw.section_id,
        section_name: raw.section_name,
        order_number: raw.order_number.unwrap_or(0),
        duration,
        course_materials: raw.course_materials.into_iter().map(map_material).collect(),
    }
}

/// Minutes across all materials; missing durations count as zero.
pub fn section_duration(materials: &[RawMaterial]) -> u32 {
    materials
        .iter()
        .map(|m| m.expected_duration.unwrap_or(0))
        .fold(0u32, u32::saturating_add)
}

pub fn map_material(raw: RawMaterial) -> Material {
    // Location lives under `url` for media and `content` for inline bodies.
    let content = raw
        .url
        .filter(|url| !url.is_empty())
        .or(raw.content.filter(|content| !content.is_empty()))
        .unwrap_or_default();

    Material {
        id: raw.id,
        material_uid: raw.material_uid,
        category: raw.category,
        name: raw.name,
        order_num: raw.order_num,
        title: raw.title,
        expected_duration: raw.expected_duration.unwrap_or(0),
        content_type: raw.content_type,
        content,
        published: raw.published,
    }
}
