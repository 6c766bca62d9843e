use clap::Parser;
use log::{info, warn};
use minifb::{Key, Window, WindowOptions};
use raster_core::algebra::Vec3;
use raster_core::camera::{Camera, FirstPersonCamera, LookAtCamera};
use raster_core::collision::Aabb;
use raster_core::geometry::cube;
use raster_core::obj_loader::load_mesh;
use raster_core::scene::Scene;
use raster_core::shader::{FlatShader, SmoothColorShader, TextureShader};
use raster_core::texture::Texture;
use std::time::Instant;

const FPS: usize = 60;
const MOVE_SPEED_PER_MS: f64 = 0.003;
const ROTATION_SPEED_PER_MS: f64 = 0.0025;

#[derive(Parser)]
#[command(author, version, about = "Interactive software rasterizer")]
struct Args {
    /// Window width in pixels.
    #[arg(long, default_value_t = 800)]
    width: usize,

    /// Window height in pixels.
    #[arg(long, default_value_t = 600)]
    height: usize,

    /// Renders at 1/scale resolution internally, then upscales for display.
    #[arg(long, default_value_t = 1)]
    scale: usize,

    /// Wavefront OBJ file to load. Falls back to a default cube if omitted.
    #[arg(long)]
    model: Option<String>,

    /// Texture file for the loaded model. Ignored for the default cube.
    #[arg(long)]
    texture: Option<String>,

    /// Use a free-flying first-person camera instead of the default
    /// look-at camera.
    #[arg(long)]
    first_person: bool,
}

fn build_scene(args: &Args) -> raster_core::error::Result<Scene> {
    let internal_w = args.width / args.scale;
    let internal_h = args.height / args.scale;
    let aspect_ratio = internal_w as f64 / internal_h as f64;

    let camera: Box<dyn Camera> = if args.first_person {
        Box::new(FirstPersonCamera::new(Vec3::new(0.0, 0.0, 4.0), 0.0, 0.0))
    } else {
        Box::new(LookAtCamera::new(Vec3::new(0.0, 0.0, 4.0), Vec3::zeros()))
    };

    let mut scene = Scene::new(
        camera,
        Vec3::new(3.0, 5.0, 5.0),
        internal_w,
        internal_h,
        args.scale,
        aspect_ratio,
    );

    let mesh = if let Some(model_path) = &args.model {
        let shader: Box<dyn raster_core::shader::Shader> = match &args.texture {
            Some(texture_path) => {
                let texture = Texture::load(texture_path)?;
                Box::new(TextureShader::new(texture))
            }
            None => Box::new(SmoothColorShader::new(200, 200, 200)),
        };
        load_mesh(model_path, shader)?
    } else {
        info!("no --model given, loading default cube");
        cube(1.5, || Box::new(FlatShader::new(180, 180, 220)))
    };

    scene.add_obstacle(Aabb::from_mesh(&mesh));
    scene.add_mesh(mesh);
    Ok(scene)
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut scene = match build_scene(&args) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("failed to build scene: {e}");
            std::process::exit(1);
        }
    };

    let mut window = Window::new(
        "softraster - ESC to exit",
        args.width,
        args.height,
        WindowOptions::default(),
    )
    .unwrap_or_else(|e| {
        panic!("failed to open window: {e}");
    });
    window.set_target_fps(FPS);

    let mut last_frame = Instant::now();

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let now = Instant::now();
        let dt_ms = now.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = now;

        process_input(&window, &mut scene, dt_ms);

        scene.render();

        let buffer = scene.present();
        if let Err(e) = window.update_with_buffer(&buffer, args.width, args.height) {
            warn!("failed to present frame: {e}");
        }
    }
}

fn process_input(window: &Window, scene: &mut Scene, dt_ms: f64) {
    let move_speed = MOVE_SPEED_PER_MS * dt_ms;
    let rotation_speed = ROTATION_SPEED_PER_MS * dt_ms;

    let mut local_movement = Vec3::zeros();
    if window.is_key_down(Key::W) {
        local_movement.z += move_speed;
    }
    if window.is_key_down(Key::S) {
        local_movement.z -= move_speed;
    }
    if window.is_key_down(Key::D) {
        local_movement.x += move_speed;
    }
    if window.is_key_down(Key::A) {
        local_movement.x -= move_speed;
    }
    if window.is_key_down(Key::E) {
        local_movement.y += move_speed;
    }
    if window.is_key_down(Key::Q) {
        local_movement.y -= move_speed;
    }

    let mut yaw_delta = 0.0;
    let mut pitch_delta = 0.0;
    if window.is_key_down(Key::Right) {
        yaw_delta += rotation_speed;
    }
    if window.is_key_down(Key::Left) {
        yaw_delta -= rotation_speed;
    }
    if window.is_key_down(Key::Up) {
        pitch_delta -= rotation_speed;
    }
    if window.is_key_down(Key::Down) {
        pitch_delta += rotation_speed;
    }

    scene.move_camera(local_movement, yaw_delta, pitch_delta);
}
