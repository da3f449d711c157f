use std::convert::TryFrom;
use std::env;

use zpl_graphic::{convert, convert_for_upload, Bitmap, Config, Position, Threshold};
//
// cargo run --example to_zpl -- logo.png --threshold 100 --label --position 10,20
//

fn print_usage() {
    println!("Usage: cargo run --example to_zpl -- <IMAGE> [OPTION]...");
    println!("Options:");
    println!("  --threshold N    Black pixel threshold 0-255 (default 128)");
    println!("  --no-compress    Emit plain hex rows");
    println!("  --label          Wrap the field in ^XA ... ^XZ");
    println!("  --position X,Y   Add a ^FO position");
    println!("  --upload NAME    Emit a ~DG command storing the image as NAME");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() || args[0] == "--help" || args[0] == "-h" {
        print_usage();
        return;
    }

    let file = &args[0];
    let mut threshold = Threshold::default();
    let mut config = Config::new();
    let mut upload: Option<String> = None;

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--threshold" => {
                let value: i32 = iter.next().and_then(|v| v.parse().ok()).unwrap_or(-1);
                threshold = match Threshold::try_from(value) {
                    Ok(t) => t,
                    Err(err) => {
                        eprintln!("Error: {}", err);
                        return;
                    }
                };
            }
            "--no-compress" => config = config.compress(false),
            "--label" => config = config.label(true),
            "--position" => {
                let pos: Vec<u32> = iter
                    .next()
                    .map(|v| v.split(',').filter_map(|n| n.parse().ok()).collect())
                    .unwrap_or_default();
                if pos.len() != 2 {
                    eprintln!("Error: position must be X,Y");
                    return;
                }
                config = config.position(Position::new(pos[0], pos[1]));
            }
            "--upload" => upload = iter.next().cloned(),
            other => {
                eprintln!("Error: Unknown option '{}'", other);
                print_usage();
                return;
            }
        }
    }

    let image = image::open(file).unwrap().to_luma8();
    let (width, height) = image.dimensions();
    let bitmap = Bitmap::from_luma(width, height, &image.into_raw(), threshold).unwrap();

    let result = match upload {
        Some(target) => convert_for_upload(&bitmap, &target, &config),
        None => convert(&bitmap, &config),
    };

    match result {
        Ok(conversion) => print!("{}", conversion.zpl),
        Err(err) => println!("ERROR {:#?}", err),
    }
}
