// ./src/debug/ui.rs
use crate::debug::visualization::svg::create_bubble_svg;
use crate::setup::fill_random;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, Slider, Window},
};
use bubble_field::math::algorithms::metaballs::EdgePolicy;
use bubble_field::session::{
    BubbleFields, BubbleSet, BubbleSettings, ClusterSnapshot, SelectionState, ShadingState,
};
use rand::{SeedableRng, rngs::StdRng};

const SVG_FILENAME: &str = "debug_bubbles.svg";
const RANDOM_FILL_COUNT: usize = 5;

#[allow(clippy::too_many_arguments)]
pub fn bubble_control_ui_system(
    mut contexts: EguiContexts,
    mut settings: ResMut<BubbleSettings>,
    mut bubbles: ResMut<BubbleSet>,
    mut shading: ResMut<ShadingState>,
    snapshot: Res<ClusterSnapshot>,
    fields: Res<BubbleFields>,
    selection_state: Res<State<SelectionState>>,
    mut fill_count: Local<u64>,
) {
    Window::new("Blasensteuerung")
        .default_width(320.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Zustand");
            ui.label(format!(
                "Blasen: {} / {}",
                bubbles.len(),
                bubbles.capacity()
            ));
            ui.label(format!(
                "Gruppen: {} (Tick {})",
                snapshot.layout.group_count(),
                snapshot.tick
            ));
            match fields.fields.as_ref() {
                Some(composited) => ui.label(format!(
                    "Belegte Zellen: {}",
                    composited.scalar.occupied_cells()
                )),
                None => ui.label("Noch kein Feld berechnet."),
            };
            match bubbles.selection() {
                Some(selection) => ui.label(format!(
                    "Auswahl ({:?}): Blase {}",
                    selection_state.get(),
                    selection.target
                )),
                None => ui.label(format!("Auswahl ({:?}): keine", selection_state.get())),
            };

            ui.collapsing("Bearbeitung", |ui| {
                ui.add(
                    Slider::new(&mut settings.default_radius, 5.0..=150.0)
                        .text("Radius neuer Blasen"),
                );
                ui.add(
                    Slider::new(&mut settings.cluster.smooth_numerator, 100.0..=10000.0)
                        .logarithmic(true)
                        .text("Glättungszähler"),
                );

                ui.horizontal(|ui| {
                    if ui.button("Zufällig füllen").clicked() {
                        // Bei festem Seed reproduzierbar, pro Klick fortgezählt
                        let mut rng = match settings.seed {
                            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(*fill_count + 1)),
                            None => StdRng::from_os_rng(),
                        };
                        *fill_count += 1;
                        fill_random(&mut bubbles, &settings, RANDOM_FILL_COUNT, &mut rng);
                    }
                    if ui.button("↺ Leeren").clicked() {
                        bubbles.clear();
                        info!("All bubbles cleared.");
                    }
                });
            });

            ui.collapsing("Shading", |ui| {
                let mut gradient_scale = settings.gradient_scale;
                if ui
                    .add(Slider::new(&mut gradient_scale, 0.0..=48.0).text("Gradientenskala"))
                    .changed()
                {
                    settings.gradient_scale = gradient_scale;
                    shading.0.gradient_scale = gradient_scale;
                }
                ui.add(
                    Slider::new(&mut shading.0.refraction_depth, 1.0..=96.0)
                        .text("Brechungstiefe"),
                );
                ui.add(Slider::new(&mut shading.0.shininess, 1.0..=64.0).text("Glanz"));

                let mut mirror = settings.edge_policy == EdgePolicy::Mirror;
                if ui.checkbox(&mut mirror, "Rand spiegeln").changed() {
                    settings.edge_policy = if mirror {
                        EdgePolicy::Mirror
                    } else {
                        EdgePolicy::Clamp
                    };
                }
                ui.label("Pfeiltasten: Neigung simulieren");
            });

            ui.collapsing("Debug", |ui| {
                if ui.button("SVG exportieren").clicked() {
                    if let Err(err) =
                        create_bubble_svg(SVG_FILENAME, &snapshot.layout, &settings.extent())
                    {
                        error!("SVG export failed: {}", err);
                    }
                }
                ui.separator();
                ui.label(egui::RichText::new(
                    "Klick: Blase anlegen / ziehen\nDoppelklick: entfernen\nMausrad: skalieren\nRechtsklick: Geste abbrechen",
                ).small());
            });
        });
}
