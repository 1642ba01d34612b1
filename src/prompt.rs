//! Development brief templates
//!
//! Each template carries one `{analysis_result}` slot that receives the
//! model's analysis verbatim.

use serde::{Deserialize, Serialize};

pub const PLACEHOLDER: &str = "{analysis_result}";

/// Source of the analysis a brief is built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum DesignKind {
    #[default]
    Image,
    Figma,
    Mixed,
}

impl DesignKind {
    /// Look up a kind by name; anything unrecognised is treated as an image
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "figma" => DesignKind::Figma,
            "mixed" => DesignKind::Mixed,
            _ => DesignKind::Image,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            DesignKind::Image => IMAGE_TEMPLATE,
            DesignKind::Figma => FIGMA_TEMPLATE,
            DesignKind::Mixed => MIXED_TEMPLATE,
        }
    }
}

impl From<String> for DesignKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl std::fmt::Display for DesignKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DesignKind::Image => write!(f, "image"),
            DesignKind::Figma => write!(f, "figma"),
            DesignKind::Mixed => write!(f, "mixed"),
        }
    }
}

/// Fill the kind's template with `analysis`
///
/// Only the first placeholder is replaced and the analysis is inserted as-is,
/// so placeholder text inside the analysis survives untouched.
pub fn assemble(analysis: &str, kind: DesignKind) -> String {
    kind.template().replacen(PLACEHOLDER, analysis, 1)
}

const IMAGE_TEMPLATE: &str = r#"
# Page Design and Development Guide

## Design Analysis
{analysis_result}

## Development Recommendations

Based on the design analysis above, provide detailed development guidance on:

1. **Technology Stack**
   - Recommended front-end framework or library
   - UI component library suited to this design
   - Required tooling and dependencies

2. **Layout Implementation**
   - HTML/CSS structure of the page
   - Responsive design strategy
   - Key layout techniques (Grid, Flexbox, etc.)

3. **Component Design**
   - Breakdown of the main UI components
   - How components interact
   - Patterns for reusable components

4. **Style Guide**
   - Exact color codes
   - Fonts and typographic scale
   - Spacing and sizing rules
   - Animations and transitions

5. **Implementation Steps**
   - Recommended order of work
   - Likely technical challenges and how to solve them
   - Optimisation and performance considerations

Include concrete code samples or pseudo-code wherever it clarifies a key implementation detail.
"#;

const FIGMA_TEMPLATE: &str = r#"
# Figma Design to Code Guide

## Figma Design Analysis
{analysis_result}

## Implementation Guide

Based on the Figma design analysis above, provide a detailed implementation guide covering:

1. **Component Structure**
   - Mapping of Figma components to React/Vue/Angular components
   - Component hierarchy and dependencies
   - State management strategy

2. **Technology Stack**
   - Best-suited front-end framework
   - Recommended UI library or component system
   - CSS methodology (Styled Components, Tailwind, CSS Modules, etc.)

3. **Precise Specifications**
   - Design token definitions
   - Color system and variables
   - Typography system
   - Spacing and layout grid
   - Responsive breakpoints

4. **Interactions**
   - Animation and transition code
   - Micro-interactions
   - State changes and feedback

5. **Roadmap**
   - Component build priority
   - Steps and milestones
   - Testing strategy

Provide concrete code structure, CSS variable definitions and component APIs so the implementation stays faithful to the Figma design.
"#;

const MIXED_TEMPLATE: &str = r#"
# Combined Design Analysis and Development Guide

## Analysis of the Screenshots and the Figma Design
{analysis_result}

## Implementation Guide

The analysis above combines reference images with Figma design data. Cross-check the two sources and provide:

1. **Reconciliation**
   - Where the images and the Figma file agree
   - Inconsistencies between them and which source should win
   - Details only one of the sources reveals

2. **Component Structure**
   - Component breakdown and hierarchy
   - Mapping of Figma components to framework components
   - State management strategy

3. **Design Tokens**
   - Color system with exact values
   - Typography system
   - Spacing, layout grid and breakpoints

4. **Layout and Interaction**
   - Page structure and responsive behaviour
   - Animations, transitions and micro-interactions

5. **Roadmap**
   - Build order and milestones
   - Technical risks and mitigations
   - Testing strategy, including visual comparison against the references

Provide concrete code samples, CSS variables and component APIs so the result matches both the images and the Figma design.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_template_has_one_placeholder() {
        for kind in [DesignKind::Image, DesignKind::Figma, DesignKind::Mixed] {
            assert_eq!(kind.template().matches(PLACEHOLDER).count(), 1, "{}", kind);
        }
    }

    #[test]
    fn test_figma_prompt_interpolates() {
        let prompt = assemble("X", DesignKind::Figma);
        assert!(prompt.contains("## Figma Design Analysis\nX\n"));
        assert!(!prompt.contains(PLACEHOLDER));
    }

    #[test]
    fn test_analysis_is_not_rescanned() {
        let prompt = assemble("literal {analysis_result} stays", DesignKind::Image);
        assert_eq!(prompt.matches(PLACEHOLDER).count(), 1);
        assert!(prompt.contains("literal {analysis_result} stays"));
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(DesignKind::from_name("figma"), DesignKind::Figma);
        assert_eq!(DesignKind::from_name(" Mixed "), DesignKind::Mixed);
        assert_eq!(DesignKind::from_name("sketch"), DesignKind::Image);
        assert_eq!(DesignKind::from_name(""), DesignKind::Image);
    }

    #[test]
    fn test_kind_deserialises_leniently() {
        let kind: DesignKind = serde_json::from_str("\"figma\"").unwrap();
        assert_eq!(kind, DesignKind::Figma);
        let kind: DesignKind = serde_json::from_str("\"whatever\"").unwrap();
        assert_eq!(kind, DesignKind::Image);
    }
}
