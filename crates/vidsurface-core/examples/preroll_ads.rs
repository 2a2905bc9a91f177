//! Pre-roll ad skip example
//!
//! Loads the playground configuration (an HLS stream with one skippable
//! pre-roll) and walks through what the surface derives from it.
//!
//! Run with: cargo run -p vidsurface-core --example preroll_ads

use vidsurface_core::{PlayerConfig, SourceKind};

const CONFIG: &str = r#"{
    "source": "https://video-dev.github.io/streams/x36xhzz/x36xhzz.m3u8",
    "autoPlay": false,
    "ads": [
        {
            "type": "pre",
            "source": "https://bitdash-a.akamaihd.net/content/MI201109210084_1/m3u8s/f08e80da-bf1d-4e3d-8899-f0f6155f6efa.m3u8",
            "url": "http://shopforshoes.com",
            "label": "Visit shopforshoes.com",
            "skip": 5
        }
    ]
}"#;

fn main() -> vidsurface_core::Result<()> {
    tracing_subscriber::fmt().with_env_filter("vidsurface_core=debug").init();
    vidsurface_core::init();

    println!("VidSurface Core - Pre-roll Ad Example");
    println!("=====================================\n");

    let config = PlayerConfig::from_json(CONFIG)?;
    let kind = SourceKind::classify(&config.source);

    println!("Source:      {}", config.source);
    println!("Kind:        {} (manifest: {})", kind, kind.is_manifest());
    println!("Autoplay:    {}", config.auto_play);
    println!("Size:        {} x {}", config.width(), config.height());
    println!("Controls:    {}", config.controls());

    let watcher = config.activity_watcher();
    println!("Auto-hide:   {} after {} ms\n", watcher.is_enabled(), watcher.timeout_ms());

    let schedule = config.ad_schedule();
    println!("Ad breaks:   {}", schedule.len());
    for ad in schedule.breaks() {
        println!("  {} -> {} ({})", ad.position, ad.label, ad.click_through_url);
    }

    if let Some(pre) = schedule.pre_roll() {
        println!("\nSkip button countdown:");
        for elapsed in 0..=6 {
            match pre.skip_remaining(elapsed as f64) {
                Some(0) => println!("  t={}s  [Skip ad]", elapsed),
                Some(left) => println!("  t={}s  skip in {}s", elapsed, left),
                None => println!("  t={}s  not skippable", elapsed),
            }
        }
    }

    println!("\nNormalized config:\n{}", config.to_json()?);
    Ok(())
}
