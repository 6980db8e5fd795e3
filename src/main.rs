use anyhow::{Context, Result};
use glam::Vec2;
use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod config;
mod core;
mod engine;
mod game;

use crate::config::{GameConfig, CONFIG_FILE};
use crate::core::math::Rect;
use crate::engine::assets::{decode_image, AssetRegistry, FileStore, ImageHandle};
use crate::engine::audio::{CuePlayer, DeviceCuePlayer, TimedCuePlayer};
use crate::engine::game_loop::GameLoop;
use crate::engine::input::InputManager;
use crate::engine::renderer::{Renderer, Sprite};
use crate::game::{MatchSession, Scene, ShapeGame};

/// Background image, if the store has one that decodes
fn load_background(store: &FileStore, key: &str) -> Option<ImageHandle> {
    let resource = match store.fetch_image(key) {
        Ok(Some(resource)) => resource,
        Ok(None) => {
            warn!("Background '{}' not found, using plain color", key);
            return None;
        }
        Err(e) => {
            warn!("Background '{}' unreadable: {}", key, e);
            return None;
        }
    };
    match decode_image(&resource.bytes) {
        Ok(image) => Some(ImageHandle::new(&resource.path, image)),
        Err(e) => {
            warn!("Background {} failed to decode: {}", resource.path, e);
            None
        }
    }
}

/// Renderer sprites for a scene: background stretched to the window, then shapes
fn scene_sprites(scene: &Scene, window: Vec2) -> Vec<Sprite> {
    let background = scene
        .background
        .iter()
        .map(|image| Sprite::new(Rect::new(Vec2::ZERO, window), image.id()));
    let shapes = scene
        .sprites
        .iter()
        .map(|s| Sprite::new(s.rect, s.image.id()).with_alpha(s.alpha));
    background.chain(shapes).collect()
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = GameConfig::load(Path::new(CONFIG_FILE))?;
    info!("Starting {}...", config.title);

    // every shape must load before the window opens
    let registry = AssetRegistry::new(FileStore::new(&config.asset_root));
    let names = config.shape_names()?;
    let shapes = registry.load_all(&names).map_err(|e| {
        error!("Asset loading failed for '{}': {}", e.name(), e);
        error!("Check that {} exists and is readable", e.path());
        e
    })?;
    info!(
        "Loaded {} shapes from {}",
        shapes.len(),
        registry.store().base_path().display()
    );

    let background = load_background(registry.store(), &config.background);
    let session = MatchSession::new(shapes)?;
    let player: Box<dyn CuePlayer> = match DeviceCuePlayer::try_default() {
        Ok(player) => Box::new(player),
        Err(e) => {
            warn!("{}; shape names will not be spoken", e);
            Box::new(TimedCuePlayer::new())
        }
    };
    let mut game = ShapeGame::new(session, player, &config).with_background(background);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.window_width,
                config.window_height,
            ))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;

    let scene = game.scene(None);
    for image in game.session().shapes().iter().flat_map(|s| [s.filled_image(), s.outline_image()]) {
        renderer
            .upload_image(image)
            .with_context(|| format!("Failed to upload {}", image.path()))?;
    }
    if let Some(image) = &scene.background {
        renderer
            .upload_image(image)
            .with_context(|| format!("Failed to upload {}", image.path()))?;
    }
    debug!("{} textures on the GPU", renderer.texture_count());

    let size = window.inner_size();
    game.set_viewport(
        Vec2::new(size.width as f32, size.height as f32),
        window.scale_factor() as f32,
    );

    let mut input = InputManager::default();
    let mut game_loop = GameLoop::new();
    let mut title = String::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    game.set_viewport(
                        Vec2::new(physical_size.width as f32, physical_size.height as f32),
                        window.scale_factor() as f32,
                    );
                }
                WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                    let size = renderer.size();
                    game.set_viewport(
                        Vec2::new(size.width as f32, size.height as f32),
                        scale_factor as f32,
                    );
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input.process_keyboard_event(&event, &game.drop_zones());
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input.process_mouse_button(button, state, &game.drop_zones());
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.process_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
                }
                WindowEvent::CursorLeft { .. } => input.process_cursor_left(),
                WindowEvent::RedrawRequested => {
                    let dt = game_loop.begin_frame();
                    for event in input.drain_events() {
                        game.handle_event(event);
                    }
                    game.update(dt);

                    if game.exit_requested() {
                        info!(
                            "Exiting after {} frames ({:.0} fps)",
                            game_loop.frame_count(),
                            game_loop.fps()
                        );
                        elwt.exit();
                        return;
                    }

                    let scene = game.scene(input.drag().position());
                    let next_title = scene.window_title();
                    if next_title != title {
                        window.set_title(&next_title);
                        title = next_title;
                    }

                    let size = renderer.size();
                    let window_size = Vec2::new(size.width as f32, size.height as f32);
                    renderer.set_sprites(scene_sprites(&scene, window_size));
                    if let Err(e) = renderer.render() {
                        error!("Render failed: {:#}", e);
                        elwt.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::registry_test_support::png_bytes;

    #[test]
    fn test_background_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(load_background(&store, "sparkly_pink_background").is_none());
    }

    #[test]
    fn test_background_loaded_from_images_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("images")).unwrap();
        std::fs::write(dir.path().join("images/bg.png"), png_bytes(4, 2)).unwrap();

        let store = FileStore::new(dir.path());
        let image = load_background(&store, "bg").unwrap();
        assert_eq!(image.get().dimensions(), (4, 2));
    }

    #[test]
    fn test_background_sprite_fills_window() {
        let image = ImageHandle::new("images/bg.png", image::RgbaImage::new(1, 1));
        let scene = Scene {
            caption: String::new(),
            name_label: None,
            background: Some(image),
            sprites: Vec::new(),
            show_end_options: false,
        };
        let sprites = scene_sprites(&scene, Vec2::new(800.0, 600.0));
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].rect.size, Vec2::new(800.0, 600.0));
    }
}
