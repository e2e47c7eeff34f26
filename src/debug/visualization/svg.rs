// src/debug/visualization/svg.rs
use crate::debug::visualization::bubbles::group_color;
use bevy::log::info;
use bevy::math::Vec2;
use bubble_field::math::algorithms::metaballs::ClusterLayout;
use bubble_field::math::types::GridExtent;
use std::io::Write;

// ===================================================================================
// HILFS-STRUCT für die SVG-Erstellung
// ===================================================================================
/// Ein Helfer zum Erstellen einer SVG-Datei.
struct SvgBuilder {
    content: String,
}

impl SvgBuilder {
    /// Erstellt ein neues SVG-Grundgerüst mit Header, Stil und Hintergrund.
    fn new(field_size: Vec2) -> Self {
        let width = field_size.x as f64;
        let height = field_size.y as f64;

        let stroke_w_thin = (width + height) / 2.0 * 0.002;
        let font_size = (width + height) / 2.0 * 0.02;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">
  <style>
    .background {{ fill: #f0f0f0; fill-opacity: 1.0; }}
    .bubble {{ fill-opacity: 0.35; stroke-width: {stroke_w_thin}; }}
    .bubble-id {{
        font-family: monospace;
        font-size: {font_size:.3}px;
        fill: #000000;
        text-anchor: middle;
        dominant-baseline: middle;
    }}
  </style>
  <rect x="0" y="0" width="{width}" height="{height}" class="background" />
"#,
        );

        Self { content }
    }

    /// Zeichnet einen Kreis mit Gruppenfarbe.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.content.push_str(&format!(
            r#"  <circle cx="{:.3}" cy="{:.3}" r="{:.3}" class="bubble" fill="{color}" stroke="{color}" />
"#,
            center.x, center.y, radius
        ));
    }

    /// Zeichnet Text.
    fn draw_text(&mut self, pos: Vec2, text: &str) {
        self.content.push_str(&format!(
            r#"  <text x="{:.3}" y="{:.3}" class="bubble-id">{}</text>
"#,
            pos.x, pos.y, text
        ));
    }

    fn finish(mut self) -> String {
        self.content.push_str("</svg>");
        self.content
    }
}

fn hex_color(group: usize) -> String {
    let [r, g, b, _] = group_color(group).as_rgba_u8();
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Baut eine SVG mit allen Blasen, eingefärbt nach Gruppe und beschriftet mit ihrer Id.
pub fn bubble_layout_svg(layout: &ClusterLayout, extent: &GridExtent) -> String {
    let field_size = Vec2::new(
        extent.width as f32 * extent.cell_size,
        extent.height as f32 * extent.cell_size,
    );
    let mut svg = SvgBuilder::new(field_size);

    for (index, (group, members)) in layout.iter().enumerate() {
        let color = hex_color(index);
        for bubble in members {
            svg.draw_circle(bubble.origin, bubble.radius, &color);
            let label = if group.member_count() > 1 {
                format!("{} g{}", bubble.id, index)
            } else {
                bubble.id.to_string()
            };
            svg.draw_text(bubble.origin, &label);
        }
    }

    svg.finish()
}

/// Schreibt die Blasen-SVG in eine Datei.
pub fn create_bubble_svg(
    filename: &str,
    layout: &ClusterLayout,
    extent: &GridExtent,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = bubble_layout_svg(layout, extent);
    let mut file = std::fs::File::create(filename)?;
    file.write_all(content.as_bytes())?;
    info!("Debug SVG '{}' wurde erstellt.", filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubble_field::math::algorithms::metaballs::{Bubble, BubbleId, ClusterConfig, cluster_bubbles};

    #[test]
    fn test_svg_contains_every_bubble() {
        let bubbles = vec![
            Bubble::new(BubbleId(0), Vec2::new(20.0, 20.0), 10.0),
            Bubble::new(BubbleId(1), Vec2::new(35.0, 20.0), 10.0),
            Bubble::new(BubbleId(2), Vec2::new(90.0, 60.0), 5.0),
        ];
        let layout = cluster_bubbles(&bubbles, &ClusterConfig::default()).unwrap();
        let extent = GridExtent::new(50, 40, 2.0).unwrap();

        let svg = bubble_layout_svg(&layout, &extent);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(r#"viewBox="0 0 100 80""#));
        assert!(svg.contains(">#2<"));
    }
}
