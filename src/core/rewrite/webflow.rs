//! Built-in tables for de-branding a Webflow site export.
//!
//! Branding rules are ordered by precedence: structural removals, whole-anchor
//! removals, specific phrases, attribute-scoped rewrites, and finally the
//! generic catch-alls. A generic rule never sees text a more specific rule
//! would have rewritten with more context.

use super::classes::ClassRename;
use super::relocate::AssetRename;
use super::rule::{CaseSensitivity, Rule, RuleSet};
use crate::error::Result;

/// File types the branding pass touches.
pub const BRANDING_EXTENSIONS: &[&str] = &["html"];

/// Attribute scope for `alt` values in either quote style.
pub const ALT_ATTRIBUTE: &str = r#"\balt\s*=\s*(?:"([^"]*)"|'([^']*)')"#;

struct BrandingRule {
    name: &'static str,
    pattern: &'static str,
    replacement: &'static str,
    case: CaseSensitivity,
    scope: Option<&'static str>,
}

const fn text(name: &'static str, pattern: &'static str, replacement: &'static str) -> BrandingRule {
    BrandingRule {
        name,
        pattern,
        replacement,
        case: CaseSensitivity::Insensitive,
        scope: None,
    }
}

const fn exact(name: &'static str, pattern: &'static str, replacement: &'static str) -> BrandingRule {
    BrandingRule {
        name,
        pattern,
        replacement,
        case: CaseSensitivity::Sensitive,
        scope: None,
    }
}

const fn alt(name: &'static str, pattern: &'static str, replacement: &'static str) -> BrandingRule {
    BrandingRule {
        name,
        pattern,
        replacement,
        case: CaseSensitivity::Insensitive,
        scope: Some(ALT_ATTRIBUTE),
    }
}

const BRANDING: &[BrandingRule] = &[
    // Structure
    exact(
        "builder-comment",
        r"<!--\s*This site was created in Webflow\.\s*https://webflow\.com\s*-->",
        "",
    ),
    text(
        "generator-meta",
        r#"[ \t]*<meta\s+(?:content=["']Webflow["']\s+name=["']generator["']|name=["']generator["']\s+content=["']Webflow["'])\s*/?>[ \t]*(?:\r?\n)?"#,
        "",
    ),
    text("powered-by-dash", r"\s*-\s*Powered by\s+<a[^>]*>Webflow</a>", ""),
    text("powered-by", r"\s*Powered by\s+<a[^>]*>Webflow</a>", ""),
    exact("badge-style", r"\.w-webflow-badge\s*\{[^}]*\}", ""),
    // Whole anchors
    text(
        "builder-link",
        r#"(?s)<a[^>]*href=["']https?://[^"']*webflow\.com[^"']*["'][^>]*>.*?</a>"#,
        "",
    ),
    // The anchor body may not run past its own closing tag.
    text(
        "more-templates-link",
        r#"<a[^>]*class=["'][^"']*more-template[^"']*["'][^>]*>(?:[^<]|<[^/]|</[^a])*?More\s+Webflow(?:\s+Webflow)*\s+Templates?(?:[^<]|<[^/]|</[^a])*?</a>"#,
        "",
    ),
    // Specific phrases
    text(
        "looking-for-more",
        r"Looking\s+for\s+more\s+amazing\s+Webflow(?:\s+Webflow)*\s+Templates\?",
        "Looking for more amazing Templates?",
    ),
    text(
        "devtech-template",
        r"Devtech\s+X\s+Webflow(?:\s+Webflow)*\s+Template",
        "Devtech X Template",
    ),
    text("devtech", r"Devtech\s+X\s+Webflow(?:\s+Webflow)*\b", "Devtech X"),
    text(
        "agency-template",
        r"our\s+ultimate\s+development\s+agency\s+Webflow(?:\s+Webflow)*\s+Template",
        "our ultimate development agency Template",
    ),
    text("hire-team", r"Hire\s+our\s+Webflow(?:\s+Webflow)*\s+team", "Hire our team"),
    text("premium-templates", r"Premium\s+Webflow(?:\s+Webflow)*\s+(Templates?)\b", "Premium ${1}"),
    text("count-templates", r"(\d+\+\s+)Webflow(?:\s+Webflow)*\s+(Templates?)\b", "${1}${2}"),
    text("buy-now", r"Buy\s+now\s+on\s+Webflow(?:\s+Webflow)*\b", "Buy now"),
    text(
        "title-ecommerce-suffix",
        r"\s*-\s*Webflow(?:\s+Webflow)*\s+Ecommerce\s+website\s+template\b",
        "",
    ),
    text("title-template-suffix", r"\s*-\s*Webflow(?:\s+Webflow)*\s+Template\b", ""),
    text(
        "ecommerce-template",
        r"\bWebflow(?:\s+Webflow)*\s+(Ecommerce\s+website\s+template)\b",
        "${1}",
    ),
    text("figma-file", r"\bWebflow(?:\s+Webflow)*\s+(Template\s+Figma\s+file)\b", "${1}"),
    text("team", r"\bWebflow(?:\s+Webflow)*\s+(team)\b", "${1}"),
    text(
        "customize-slug",
        r"customize-your-webflow-template",
        "customize-your-template",
    ),
    // Attribute values
    alt("alt-leading", r"^\s*Webflow\b\s*", ""),
    alt("alt-text", r"\s*\bWebflow\b", ""),
    // Catch-alls
    text("templates", r"\bWebflow(?:\s+Webflow)*\s+(templates?)\b", "${1}"),
    text("builder-url", r#"https?://[^"'\s]*webflow\.com[^"'\s]*"#, ""),
    text("on-builder", r"\s*\bon(?:\s+on)*\s+Webflow(?:\s+Webflow)*\b", ""),
];

/// The HTML branding-removal table.
pub fn branding_rules() -> Result<RuleSet> {
    let mut rules = RuleSet::new("strip");

    for entry in BRANDING {
        let rule = Rule::regex(entry.name, entry.pattern, entry.replacement, entry.case)?;
        let rule = match entry.scope {
            Some(scope) => rule.within(scope)?,
            None => rule,
        };
        rules.push(rule);
    }

    Ok(rules)
}

/// Builder-prefixed classes and their neutral names.
pub fn default_class_map() -> Vec<ClassRename> {
    vec![
        ClassRename::new("more-webflow-templates-sub", "more-templates-sub"),
        ClassRename::new("webflow-image-wrapper", "image-wrapper"),
        ClassRename::new("webflow-card-wrapper", "card-wrapper"),
        ClassRename::new("w-webflow-badge", "w-badge"),
    ]
}

/// Builder-named stylesheet and script files and their new paths.
pub fn default_asset_map() -> Vec<AssetRename> {
    vec![
        AssetRename::new("css/webflow.css", "css/styles.css"),
        AssetRename::new("css/chude-dev-bb9e21.webflow.css", "css/chude-dev-bb9e21.css"),
        AssetRename::new("js/webflow.js", "js/main.js"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(input: &str) -> String {
        branding_rules().unwrap().apply(input).content
    }

    #[test]
    fn every_builtin_pattern_compiles() {
        let rules = branding_rules().unwrap();
        assert_eq!(rules.len(), BRANDING.len());
    }

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<&str> = BRANDING.iter().map(|s| s.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), BRANDING.len());
    }

    #[test]
    fn generator_meta_line_is_removed() {
        assert_eq!(strip("<meta content=\"Webflow\" name=\"generator\">\n"), "");
        assert_eq!(
            strip("<head>\n  <meta name='generator' content='Webflow' />\n  <title>x</title>"),
            "<head>\n  <title>x</title>"
        );
    }

    #[test]
    fn builder_comment_is_removed() {
        assert_eq!(
            strip("<!DOCTYPE html><!--  This site was created in Webflow. https://webflow.com  --><html>"),
            "<!DOCTYPE html><html>"
        );
    }

    #[test]
    fn powered_by_trailer_is_removed_with_its_anchor() {
        let out = strip(r#"... - Powered by <a href="https://webflow.com">Webflow</a>"#);
        assert_eq!(out, "...");
    }

    #[test]
    fn builder_anchor_removed_across_lines() {
        let input = "<p>Hi<a class=\"x\" href=\"https://webflow.com/templates\">\n  Browse\n</a></p>";
        assert_eq!(strip(input), "<p>Hi</p>");
    }

    #[test]
    fn more_templates_link_does_not_swallow_following_anchors() {
        let input = concat!(
            r#"<a class="more-template-link" href="/t">More Webflow Templates</a>"#,
            r#"<a href="/next">Next</a>"#
        );
        assert_eq!(strip(input), r#"<a href="/next">Next</a>"#);

        let unrelated = r#"<a class="more-template-link" href="/t">Browse</a><p>Templates</p>"#;
        assert_eq!(strip(unrelated), unrelated);
    }

    #[test]
    fn alt_text_keeps_surrounding_words() {
        assert_eq!(
            strip(r#"<img alt="Product Webflow Template Photo">"#),
            r#"<img alt="Product Template Photo">"#
        );
        assert_eq!(strip(r#"<img alt='Webflow Template'>"#), r#"<img alt='Template'>"#);
        assert_eq!(strip(r#"<img alt="Built with Webflow">"#), r#"<img alt="Built with">"#);
    }

    #[test]
    fn title_suffixes_are_dropped() {
        assert_eq!(
            strip("<title>Shop - Webflow Ecommerce website template</title>"),
            "<title>Shop</title>"
        );
        assert_eq!(
            strip("<title>Devtech X - Webflow Template</title>"),
            "<title>Devtech X</title>"
        );
    }

    #[test]
    fn specific_phrases_keep_context() {
        assert_eq!(strip("Hire our Webflow team"), "Hire our team");
        assert_eq!(strip("Premium Webflow Templates"), "Premium Templates");
        assert_eq!(strip("100+ Webflow Templates"), "100+ Templates");
        assert_eq!(strip("Buy now on Webflow"), "Buy now");
        assert_eq!(strip("The Devtech X Webflow Template"), "The Devtech X Template");
        assert_eq!(strip("Welcome to Devtech X Webflow"), "Welcome to Devtech X");
        assert_eq!(
            strip("Looking for more amazing Webflow Templates?"),
            "Looking for more amazing Templates?"
        );
        assert_eq!(strip("our Webflow team rocks"), "our team rocks");
    }

    #[test]
    fn generic_rules_preserve_case_and_number() {
        assert_eq!(strip("Get this webflow template"), "Get this template");
        assert_eq!(strip("All Webflow Templates"), "All Templates");
    }

    #[test]
    fn builder_urls_are_removed_inside_attributes() {
        assert_eq!(
            strip(r#"<img data-src="https://assets.webflow.com/img.png" src="a.png">"#),
            r#"<img data-src="" src="a.png">"#
        );
    }

    #[test]
    fn on_builder_needs_a_word_boundary() {
        assert_eq!(strip("Built on Webflow."), "Built.");
        assert_eq!(strip("Version Webflowless"), "Version Webflowless");
    }

    #[test]
    fn customize_slug_is_rewritten() {
        assert_eq!(
            strip(r#"<img alt="customize-your-webflow-template">"#),
            r#"<img alt="customize-your-template">"#
        );
    }

    #[test]
    fn badge_style_block_is_removed_case_sensitively() {
        assert_eq!(strip("<style>.w-webflow-badge { display:none }</style>"), "<style></style>");
        assert_eq!(
            strip("<style>.W-WEBFLOW-BADGE { x }</style>"),
            "<style>.W-WEBFLOW-BADGE { x }</style>"
        );
    }

    #[test]
    fn clean_markup_is_untouched() {
        let rules = branding_rules().unwrap();
        let input = "<html><body><h1>Hello</h1><img alt=\"Team photo\"></body></html>\n";
        let result = rules.apply(input);
        assert!(!result.changed);
        assert!(result.hits.is_empty());
    }

    #[test]
    fn stripping_twice_is_a_no_op() {
        let page = concat!(
            "<!DOCTYPE html><!-- This site was created in Webflow. https://webflow.com --><html>\n",
            "<head>\n<meta content=\"Webflow\" name=\"generator\">\n",
            "<title>Devtech X - Webflow Ecommerce website template</title></head>\n",
            "<body><h2>100+ Webflow Templates</h2>\n",
            "<img alt=\"Product Webflow Template Photo\" src=\"https://uploads.webflow.com/a.png\">\n",
            "<p>Hire our Webflow team. Buy now on Webflow. Built on Webflow.</p>\n",
            "<a href=\"https://webflow.com/templates/designers\">More by us</a>\n",
            "<div>Copyright - Powered by <a href=\"https://webflow.com\">Webflow</a></div>\n",
            "</body></html>\n"
        );

        let rules = branding_rules().unwrap();
        let once = rules.apply(page);
        assert!(once.changed);
        assert!(!once.content.to_lowercase().contains("webflow"), "{}", once.content);

        let twice = rules.apply(&once.content);
        assert!(!twice.changed);
    }

    #[test]
    fn repeated_brand_word_is_removed_in_one_pass() {
        let rules = branding_rules().unwrap();
        let cases = [
            ("Hire our Webflow Webflow team", "Hire our team"),
            ("Built on on Webflow Webflow", "Built"),
            ("Premium Webflow Webflow Templates", "Premium Templates"),
            ("Buy now on Webflow  Webflow", "Buy now"),
            ("<title>Shop - Webflow Webflow Template</title>", "<title>Shop</title>"),
            ("our Webflow\nWebflow team", "our team"),
        ];

        for (input, expected) in cases {
            let once = rules.apply(input);
            assert_eq!(once.content, expected, "input: {}", input);
            assert!(!rules.apply(&once.content).changed, "input: {}", input);
        }
    }

    #[test]
    fn default_maps_match_export_layout() {
        let classes = default_class_map();
        assert!(classes.contains(&ClassRename::new("w-webflow-badge", "w-badge")));

        let assets = default_asset_map();
        assert_eq!(assets[0], AssetRename::new("css/webflow.css", "css/styles.css"));
        assert_eq!(assets.len(), 3);
    }
}
