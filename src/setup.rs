// ./src/setup.rs
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::render::texture::ImageSampler;
use bubble_field::math::algorithms::shade_sample;
use bubble_field::math::utils::random::{random_in_range, random_point_in_rect};
use bubble_field::session::{BubbleFields, BubbleSet, BubbleSettings, ShadingState};
use rand::{Rng, SeedableRng, rngs::StdRng};

const INITIAL_BUBBLES: usize = 6;
/// Kantenlänge eines Schachbrettfelds im Hintergrund (Feldraum).
const CHECKER_SIZE: f32 = 40.0;

/// Abbildung zwischen Feldraum (Ursprung oben links, y nach unten) und
/// Weltkoordinaten der 2D-Kamera (Ursprung Mitte, y nach oben).
#[derive(Resource, Debug, Clone, Copy)]
pub struct FieldView {
    pub field_size: Vec2,
}

impl FieldView {
    pub fn field_to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x - self.field_size.x * 0.5,
            self.field_size.y * 0.5 - point.y,
        )
    }

    pub fn world_to_field(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x + self.field_size.x * 0.5,
            self.field_size.y * 0.5 - point.y,
        )
    }
}

/// Bild, in das pro Tick das gebrochene Hintergrundmuster geschrieben wird.
#[derive(Resource, Debug, Clone)]
pub struct FieldImage(pub Handle<Image>);

pub fn setup_scene(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    settings: Res<BubbleSettings>,
) {
    let extent = settings.extent();
    let field_size = Vec2::new(
        extent.width as f32 * extent.cell_size,
        extent.height as f32 * extent.cell_size,
    );

    let mut image = Image::new_fill(
        Extent3d {
            width: extent.width.max(1) as u32,
            height: extent.height.max(1) as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    image.sampler = ImageSampler::nearest();
    let handle = images.add(image);

    commands.spawn(Camera2dBundle::default());
    commands.spawn(SpriteBundle {
        texture: handle.clone(),
        sprite: Sprite {
            custom_size: Some(field_size),
            ..default()
        },
        ..default()
    });

    commands.insert_resource(FieldView { field_size });
    commands.insert_resource(FieldImage(handle));
}

pub fn spawn_initial_bubbles(mut bubbles: ResMut<BubbleSet>, settings: Res<BubbleSettings>) {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let added = fill_random(&mut bubbles, &settings, INITIAL_BUBBLES, &mut rng);
    info!("Initial scene with {} bubbles", added);
}

/// Legt bis zu `count` zufällige Blasen im Feld an und gibt die Anzahl der
/// tatsächlich angelegten zurück.
pub fn fill_random(
    bubbles: &mut BubbleSet,
    settings: &BubbleSettings,
    count: usize,
    rng: &mut impl Rng,
) -> usize {
    let extent = settings.extent();
    if let Err(err) = extent.validate() {
        warn!("Random fill skipped: {}", err);
        return 0;
    }
    let max = Vec2::new(
        extent.width as f32 * extent.cell_size,
        extent.height as f32 * extent.cell_size,
    );
    let mut added = 0;
    for _ in 0..count {
        let origin = random_point_in_rect(Vec2::ZERO, max, rng);
        let radius = random_in_range(
            settings.default_radius * 0.5,
            settings.default_radius * 1.2,
            rng,
        );
        match bubbles.add(origin, radius) {
            Ok(_) => added += 1,
            Err(err) => {
                warn!("Random fill stopped: {}", err);
                break;
            }
        }
    }
    added
}

fn checker(point: Vec2) -> Vec3 {
    let tile = (point / CHECKER_SIZE).floor();
    if (tile.x as i64 + tile.y as i64).rem_euclid(2) == 0 {
        Vec3::new(0.92, 0.9, 0.85)
    } else {
        Vec3::new(0.25, 0.32, 0.45)
    }
}

/// Schreibt das Hintergrundmuster, innerhalb der Blasen um den Gradienten
/// versetzt abgetastet und mit Glanzlicht überlagert.
pub fn render_field_image_system(
    fields: Res<BubbleFields>,
    shading: Res<ShadingState>,
    field_image: Option<Res<FieldImage>>,
    mut images: ResMut<Assets<Image>>,
) {
    if !(fields.is_changed() || shading.is_changed()) {
        return;
    }
    let (Some(field_image), Some(composited)) = (field_image, fields.fields.as_ref()) else {
        return;
    };
    let Some(image) = images.get_mut(&field_image.0) else {
        return;
    };

    let gradient = &composited.gradient;
    let extent = gradient.extent();
    if image.data.len() != extent.cell_count() * 4 {
        warn!("Field image size does not match grid {}x{}", extent.width, extent.height);
        return;
    }

    for (index, (sample, pixel)) in gradient
        .samples()
        .iter()
        .zip(image.data.chunks_exact_mut(4))
        .enumerate()
    {
        let center = extent.cell_center(index % extent.width, index / extent.width);
        let shaded = shade_sample(sample, &shading.0);

        let color = if shaded.inside {
            let refracted = checker(center + shaded.offset) * 0.85 + Vec3::new(0.02, 0.06, 0.1);
            refracted.lerp(Vec3::ONE, shaded.highlight)
        } else {
            checker(center)
        };

        pixel[0] = (color.x.clamp(0.0, 1.0) * 255.0) as u8;
        pixel[1] = (color.y.clamp(0.0, 1.0) * 255.0) as u8;
        pixel[2] = (color.z.clamp(0.0, 1.0) * 255.0) as u8;
        pixel[3] = 255;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_view_roundtrip() {
        let view = FieldView {
            field_size: Vec2::new(800.0, 600.0),
        };
        assert_eq!(view.field_to_world(Vec2::ZERO), Vec2::new(-400.0, 300.0));
        let p = Vec2::new(123.0, 45.0);
        assert_eq!(view.world_to_field(view.field_to_world(p)), p);
    }

    #[test]
    fn test_fill_random_respects_capacity() {
        let mut set = BubbleSet::with_capacity(3);
        let mut rng = StdRng::seed_from_u64(3);
        let added = fill_random(&mut set, &BubbleSettings::default(), 5, &mut rng);
        assert_eq!(added, 3);
        assert_eq!(set.len(), 3);
    }
}
