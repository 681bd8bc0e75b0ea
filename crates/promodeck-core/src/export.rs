//! Plain-text export of a concept brief.
//!
//! The copy-to-clipboard action serializes the brief into a fixed,
//! human-readable template: labeled fields, layout sections numbered from 1
//! in their returned order.

use crate::{ConceptBrief, PromodeckError, Result};
use handlebars::Handlebars;
use serde::Serialize;

const EXPORT_TEMPLATE: &str = "\
[Promotion] {{promotion_name}}
[Concept] {{concept_summary}}

[Main Copy] {{main_copy}}
[Sub Copy] {{sub_copy}}
[Keywords] {{keywords}}

[Layout]
{{#each layout}}{{index}}. {{section_name}}
- Visual: {{visual_description}}
- Copy: {{copy}}
{{/each}}
[Director's Notes]
{{director_notes}}";

/// Renders briefs into the fixed clipboard text template.
pub struct BriefExporter {
    registry: Handlebars<'static>,
}

/// Flattened view of a brief with keywords joined and sections numbered.
#[derive(Serialize)]
struct BriefView<'a> {
    promotion_name: &'a str,
    concept_summary: &'a str,
    main_copy: &'a str,
    sub_copy: &'a str,
    keywords: String,
    layout: Vec<SectionView<'a>>,
    director_notes: &'a str,
}

#[derive(Serialize)]
struct SectionView<'a> {
    index: usize,
    section_name: &'a str,
    visual_description: &'a str,
    copy: &'a str,
}

impl<'a> From<&'a ConceptBrief> for BriefView<'a> {
    fn from(brief: &'a ConceptBrief) -> Self {
        Self {
            promotion_name: &brief.promotion_name,
            concept_summary: &brief.concept_summary,
            main_copy: &brief.copywriting.main_copy,
            sub_copy: &brief.copywriting.sub_copy,
            keywords: brief.copywriting.keywords.join(", "),
            layout: brief
                .layout
                .iter()
                .enumerate()
                .map(|(i, section)| SectionView {
                    index: i + 1,
                    section_name: &section.section_name,
                    visual_description: &section.visual_description,
                    copy: &section.copy,
                })
                .collect(),
            director_notes: &brief.director_notes,
        }
    }
}

impl BriefExporter {
    /// Create an exporter with the built-in template registered.
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        // Plain-text output, so no HTML escaping.
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string("brief", EXPORT_TEMPLATE)
            .expect("built-in export template must parse");
        Self { registry }
    }

    /// Serialize a brief into labeled plain text.
    ///
    /// Pure function of the brief: the same brief always renders to the
    /// same text.
    pub fn render(&self, brief: &ConceptBrief) -> Result<String> {
        let view = BriefView::from(brief);
        self.registry
            .render("brief", &view)
            .map_err(|e| PromodeckError::RenderError(e.to_string()))
    }
}

impl Default for BriefExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Copywriting, LayoutSection};

    fn sample_brief() -> ConceptBrief {
        ConceptBrief {
            promotion_name: "Summer Splash".to_string(),
            concept_summary: "Clean and refreshing".to_string(),
            layout: vec![LayoutSection {
                section_name: "Hero".to_string(),
                visual_description: "blue gradient".to_string(),
                copy: "Feel Fresh".to_string(),
            }],
            copywriting: Copywriting {
                main_copy: "Feel the Splash".to_string(),
                sub_copy: "Cool water, every day".to_string(),
                keywords: vec!["clean".to_string(), "citrus".to_string()],
            },
            director_notes: "Use cool tones".to_string(),
        }
    }

    #[test]
    fn every_label_and_value_appears() {
        let text = BriefExporter::new().render(&sample_brief()).unwrap();

        assert!(text.contains("[Promotion] Summer Splash"));
        assert!(text.contains("[Concept] Clean and refreshing"));
        assert!(text.contains("[Main Copy] Feel the Splash"));
        assert!(text.contains("[Sub Copy] Cool water, every day"));
        assert!(text.contains("[Keywords] clean, citrus"));
        assert!(text.contains("[Layout]"));
        assert!(text.contains("1. Hero"));
        assert!(text.contains("- Visual: blue gradient"));
        assert!(text.contains("- Copy: Feel Fresh"));
        assert!(text.contains("[Director's Notes]"));
        assert!(text.contains("Use cool tones"));
    }

    #[test]
    fn layout_sections_are_numbered_in_input_order() {
        let mut brief = sample_brief();
        brief.layout.push(LayoutSection {
            section_name: "Reviews".to_string(),
            visual_description: "customer photos".to_string(),
            copy: "Loved by thousands".to_string(),
        });

        let text = BriefExporter::new().render(&brief).unwrap();
        let hero = text.find("1. Hero").expect("hero section numbered first");
        let reviews = text.find("2. Reviews").expect("reviews section numbered second");
        assert!(hero < reviews);
    }

    #[test]
    fn rendering_is_deterministic() {
        let exporter = BriefExporter::new();
        let brief = sample_brief();
        assert_eq!(
            exporter.render(&brief).unwrap(),
            exporter.render(&brief).unwrap()
        );
    }

    #[test]
    fn keywords_render_without_escaping() {
        let mut brief = sample_brief();
        brief.copywriting.keywords = vec!["cool & calm".to_string()];

        let text = BriefExporter::new().render(&brief).unwrap();
        assert!(text.contains("[Keywords] cool & calm"));
    }
}
