//! Static HTML snapshot of a layout.
//!
//! Renders the final resting state of a [`Layout`]: a relatively positioned
//! container as tall as the content, with every tile absolutely positioned
//! at its packed coordinates. No script is emitted; the snapshot is what the
//! grid looks like once every tween has finished.
//!
//! ## Static Assets
//!
//! - `static/masonry.css`: tile, image and overlay styles. Gap and hover
//!   values are injected as CSS custom properties from the config.

use crate::config::{HoverConfig, MasonryConfig, generate_grid_css};
use crate::packer::Layout;
use crate::types::PlacedItem;
use maud::{DOCTYPE, Markup, html};

const CSS_STATIC: &str = include_str!("../static/masonry.css");

/// Whole-pixel values print without a fractional part.
fn px(value: f64) -> String {
    format!("{}px", value)
}

fn tile_style(placed: &PlacedItem) -> String {
    format!(
        "left: {}; top: {}; width: {}; height: {};",
        px(placed.x),
        px(placed.y),
        px(placed.width),
        px(placed.height)
    )
}

fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (css) }
            }
            body {
                (content)
            }
        }
    }
}

/// Renders one tile: a link opening in a new tab, wrapping its image.
fn render_tile(placed: &PlacedItem, hover: &HoverConfig) -> Markup {
    let class = if hover.scale_on_hover {
        "masonry-item hover-scale"
    } else {
        "masonry-item"
    };
    html! {
        a class=(class) href=(placed.url) target="_blank" rel="noopener noreferrer"
            data-key=(placed.id) style=(tile_style(placed)) {
            img src=(placed.img) alt="" loading="lazy";
            @if hover.color_shift_on_hover {
                div.color-overlay {}
            }
        }
    }
}

/// Renders the grid container and its tiles. An empty layout renders an
/// empty zero-height container.
pub fn render_grid(layout: &Layout, hover: &HoverConfig) -> Markup {
    let style = format!("height: {};", px(layout.content_height()));
    html! {
        div.masonry-list style=(style) data-columns=(layout.columns) {
            @for placed in &layout.placements {
                (render_tile(placed, hover))
            }
        }
    }
}

/// Renders a standalone HTML page containing the grid.
pub fn render_page(layout: &Layout, config: &MasonryConfig, title: &str) -> String {
    let css = format!("{}\n\n{}", generate_grid_css(config), CSS_STATIC);
    base_document(title, &css, render_grid(layout, &config.hover)).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packer::pack;
    use crate::test_helpers::{item, scenario_items};

    fn scenario_layout() -> Layout {
        pack(3, 952.0, 16.0, &scenario_items()).unwrap()
    }

    #[test]
    fn page_includes_doctype_and_css_variables() {
        let page = render_page(&scenario_layout(), &MasonryConfig::default(), "Work");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Work</title>"));
        assert!(page.contains("--masonry-gap: 16px;"));
        assert!(page.contains(".masonry-item img"));
    }

    #[test]
    fn container_is_as_tall_as_content() {
        let html = render_grid(&scenario_layout(), &HoverConfig::default()).into_string();
        assert!(html.contains(r#"style="height: 732px;""#));
        assert!(html.contains(r#"data-columns="3""#));
    }

    #[test]
    fn tiles_are_positioned_links() {
        let html = render_grid(&scenario_layout(), &HoverConfig::default()).into_string();
        assert_eq!(html.matches("<a ").count(), 5);
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"href="https://example.com/4""#));
        assert!(html.contains(r#"data-key="4""#));
        // item 4 lands under item 2 in the middle column
        assert!(html.contains("left: 322.6666666666667px; top: 266px;"));
    }

    #[test]
    fn tiles_follow_item_order() {
        let html = render_grid(&scenario_layout(), &HoverConfig::default()).into_string();
        let positions: Vec<usize> = ["1", "2", "3", "4", "5"]
            .iter()
            .map(|id| html.find(&format!(r#"data-key="{id}""#)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn hover_options_change_markup() {
        let layout = pack(1, 300.0, 0.0, &[item("a", 100.0)]).unwrap();

        let plain = render_grid(&layout, &HoverConfig::default()).into_string();
        assert!(plain.contains("hover-scale"));
        assert!(!plain.contains("color-overlay"));

        let hover = HoverConfig {
            scale_on_hover: false,
            color_shift_on_hover: true,
            ..HoverConfig::default()
        };
        let shifted = render_grid(&layout, &hover).into_string();
        assert!(!shifted.contains("hover-scale"));
        assert!(shifted.contains("color-overlay"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let mut evil = item("x", 10.0);
        evil.url = r#"https://example.com/?a="b"&c"#.into();
        let layout = pack(1, 100.0, 0.0, &[evil]).unwrap();
        let html = render_grid(&layout, &HoverConfig::default()).into_string();
        assert!(html.contains("&quot;b&quot;&amp;c"));
    }

    #[test]
    fn images_fill_the_tile_box() {
        let start = CSS_STATIC.find(".masonry-item {").unwrap();
        let end = start + CSS_STATIC[start..].find('}').unwrap();
        let tile_rule = &CSS_STATIC[start..end];
        assert!(tile_rule.contains("position: absolute"));
        assert!(!tile_rule.contains("padding"));
        assert!(CSS_STATIC.contains("width: 100%;\n    height: 100%;"));
    }

    #[test]
    fn empty_layout_renders_empty_container() {
        let html = render_grid(&Layout::empty(), &HoverConfig::default()).into_string();
        assert!(html.contains(r#"style="height: 0px;""#));
        assert!(!html.contains("<a "));
    }
}
