use anyhow::{Context, Result};
use echocast::math::Vec3;
use echocast::scene::{EntityId, LayerMask, StaticScene};
use echocast::{AudioReceiver, FilterBank, ReceiverDesc, ReceiverEvent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

const WALLS: u8 = 0;
const SOURCES: u8 = 8;
const RECEIVER: u8 = 9;

const SAMPLE_RATE: u32 = 48000;
const BLOCK_SIZE: usize = 1024;

const LISTENER: EntityId = EntityId::new(1);
const RADIO: EntityId = EntityId::new(2);
const NEIGHBOUR: EntityId = EntityId::new(3);

pub fn run_cli_tests() -> Result<()> {
    log::info!("=== Running Open Room Test ===");
    test_open_room()?;

    log::info!("\n=== Running Walk Behind Wall Test ===");
    test_walk_behind_wall()?;

    Ok(())
}

/// Room with a divider. The radio shares the listener's half, the neighbour sits behind the divider.
fn build_scene() -> StaticScene {
    let mut scene = StaticScene::new();
    let t = 0.5;
    let (min, max) = (Vec3::new(-6.0, -1.0, -4.0), Vec3::new(6.0, 3.0, 4.0));

    let walls = [
        (Vec3::new(min.x - t, min.y - t, min.z - t), Vec3::new(min.x, max.y + t, max.z + t)),
        (Vec3::new(max.x, min.y - t, min.z - t), Vec3::new(max.x + t, max.y + t, max.z + t)),
        (Vec3::new(min.x - t, min.y - t, min.z - t), Vec3::new(max.x + t, min.y, max.z + t)),
        (Vec3::new(min.x - t, max.y, min.z - t), Vec3::new(max.x + t, max.y + t, max.z + t)),
        (Vec3::new(min.x - t, min.y - t, min.z - t), Vec3::new(max.x + t, max.y + t, min.z)),
        (Vec3::new(min.x - t, min.y - t, max.z), Vec3::new(max.x + t, max.y + t, max.z + t)),
    ];
    for (i, (lo, hi)) in walls.into_iter().enumerate() {
        scene.add_box(EntityId::new(100 + i as u64), WALLS, lo, hi);
    }
    // Divider with a doorway gap near the far wall
    scene.add_box(
        EntityId::new(200),
        WALLS,
        Vec3::new(1.75, -1.0, -4.0),
        Vec3::new(2.25, 3.0, 2.5),
    );

    scene.set_position(LISTENER, Vec3::ZERO);
    scene.add_sphere(LISTENER, RECEIVER, Vec3::ZERO, 0.3);

    let radio_position = Vec3::new(-3.0, 0.0, 1.0);
    scene.set_position(RADIO, radio_position);
    scene.add_sphere(RADIO, SOURCES, radio_position, 0.3);

    let neighbour_position = Vec3::new(4.5, 0.0, -2.0);
    scene.set_position(NEIGHBOUR, neighbour_position);
    scene.add_sphere(NEIGHBOUR, SOURCES, neighbour_position, 0.3);

    scene
}

fn receiver_desc() -> ReceiverDesc {
    ReceiverDesc::default()
        .ray_count(360)
        .max_bounces(2)
        .max_ray_distance(20.0)
        .bounce_layers(LayerMask::layer(WALLS))
        .source_layers(LayerMask::layer(SOURCES))
        .receiver_layers(LayerMask::layer(RECEIVER))
}

fn test_open_room() -> Result<()> {
    let scene = build_scene();
    let desc = receiver_desc();

    let mut filters = FilterBank::new(SAMPLE_RATE);
    for source in [RADIO, NEIGHBOUR] {
        filters.attach_lowpass(source, desc.max_cutoff_frequency);
        filters.attach_echo(source);
    }

    let mut receiver = AudioReceiver::new(LISTENER, desc);
    receiver.try_add_source(RADIO)?;
    receiver.try_add_source(NEIGHBOUR)?;

    let report = receiver.run_tick(&scene, &scene, &mut filters);
    log::info!("Tick: {}", report);
    for source in &report.sources {
        log::info!(
            "Source {}: {} visible rays, muffle {:.2}, cutoff {:.0} Hz",
            source.source,
            source.visible_rays,
            source.muffle_percent,
            source.cutoff_frequency
        );
    }
    if let Some(echo) = report.echo {
        log::info!(
            "Echo: wet {:.2}, delay {:.2} ms, decay {:.2}",
            echo.wet_mix,
            echo.delay,
            echo.decay_ratio
        );
    }

    // Push a short noise burst through each source's filter chain
    for source in [RADIO, NEIGHBOUR] {
        let mut block = noise_block(BLOCK_SIZE, source.raw());
        let before = rms(&block);
        filters
            .process(source, &mut block)
            .with_context(|| format!("processing block for {}", source))?;
        log::info!(
            "Source {} block RMS {:.4} -> {:.4}",
            source,
            before,
            rms(&block)
        );
    }

    Ok(())
}

fn test_walk_behind_wall() -> Result<()> {
    let mut scene = build_scene();
    let mut filters = FilterBank::new(SAMPLE_RATE);
    filters.attach_lowpass(RADIO, 22000.0);

    let mut receiver = AudioReceiver::new(LISTENER, receiver_desc().max_bounces(1));
    receiver.try_add_source(RADIO)?;

    // 60 fps for three seconds while walking toward and past the divider
    let frame = Duration::from_micros(16_667);
    let start = Vec3::ZERO;
    let end = Vec3::new(4.5, 0.0, 0.0);
    let frames = 180;
    for i in 0..=frames {
        let position = start.lerp(end, i as f32 / frames as f32);
        scene.set_position(LISTENER, position);

        if let Some(report) = receiver.update(frame, &scene, &scene, &mut filters) {
            let cutoff = filters
                .lowpass(RADIO)
                .map(|f| f.cutoff_frequency())
                .context("radio lost its low-pass filter")?;
            log::info!(
                "Listener at {:.2}: radio cutoff {:.0} Hz ({})",
                position.x,
                cutoff,
                report
            );
        }
    }

    let errors = receiver
        .poll_events()
        .into_iter()
        .filter(ReceiverEvent::is_error)
        .count();
    log::info!("Walk finished with {} error events", errors);

    Ok(())
}

/// Seeded white noise in `[-1, 1)`.
fn noise_block(len: usize, seed: u64) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.random_range(-1.0f32..1.0)).collect()
}

fn rms(block: &[f32]) -> f32 {
    if block.is_empty() {
        return 0.0;
    }
    (block.iter().map(|s| s * s).sum::<f32>() / block.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_block_is_seeded() {
        let block = noise_block(BLOCK_SIZE, 7);
        assert_eq!(block.len(), BLOCK_SIZE);
        assert!(block.iter().all(|s| (-1.0..1.0).contains(s)));
        assert_eq!(block, noise_block(BLOCK_SIZE, 7));
        assert_ne!(block, noise_block(BLOCK_SIZE, 8));
        assert!(rms(&block) > 0.1);
    }
}
