use earth_viewer::textures::{decode_texture, ColorSpace, TextureLoader, TextureRole};
use std::path::PathBuf;
use std::task::Poll;
use std::time::{Duration, Instant};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("earth_viewer_tex_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[cfg(test)]
mod texture_loading_tests {
    use super::*;

    #[test]
    fn test_decode_png_to_rgba() {
        let dir = scratch_dir("decode");
        let path = dir.join("tile.png");
        image::RgbaImage::from_fn(4, 2, |x, _| image::Rgba([x as u8 * 60, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let data = decode_texture(&path, ColorSpace::Linear).unwrap();
        assert_eq!((data.width, data.height), (4, 2));
        assert_eq!(data.rgba.len(), 4 * 2 * 4);
        assert_eq!(&data.rgba[4..8], &[60, 0, 0, 255]);
        assert_eq!(data.color_space, ColorSpace::Linear);

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_decode_jpeg_adds_alpha() {
        let dir = scratch_dir("jpeg");
        let path = dir.join("day.jpg");
        image::RgbImage::from_pixel(16, 8, image::Rgb([200, 200, 200]))
            .save(&path)
            .unwrap();

        let data = decode_texture(&path, ColorSpace::Srgb).unwrap();
        assert_eq!((data.width, data.height), (16, 8));
        assert!(data.rgba.chunks(4).all(|px| px[3] == 255));

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = scratch_dir("corrupt");
        let path = dir.join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(decode_texture(&path, ColorSpace::Srgb).is_err());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_poll_resolves_exactly_once() {
        let dir = scratch_dir("poll");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 255, 255]))
            .save(dir.join(TextureRole::EarthNormal.file_name()))
            .unwrap();

        let loader = TextureLoader::new(&dir);
        let mut pending = loader.load_role(TextureRole::EarthNormal);

        let deadline = Instant::now() + Duration::from_secs(10);
        let result = loop {
            if let Poll::Ready(result) = pending.poll() {
                break result;
            }
            assert!(Instant::now() < deadline, "decode never finished");
            std::thread::sleep(Duration::from_millis(5));
        };

        let data = result.unwrap();
        assert_eq!(data.color_space, ColorSpace::Linear);
        assert!(pending.poll().is_pending());

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_wait_on_missing_file() {
        let loader = TextureLoader::new("/nonexistent/earth-viewer/textures");
        let pending = loader.load_role(TextureRole::EarthClouds);

        let err = futures::executor::block_on(pending.wait()).unwrap_err();
        assert!(format!("{:#}", err).contains("earth_clouds.jpg"));
    }

    #[test]
    fn test_every_role_has_a_distinct_file() {
        let mut names: Vec<_> = TextureRole::ALL.iter().map(|r| r.file_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
