use std::env;
use std::fs;

use image::GrayImage;
//
// cargo run --example from_zpl -- label.zpl label.png
//

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        println!("usage: from_zpl <zpl-file> <output-image>");
        return;
    }

    let text = fs::read_to_string(&args[1]).unwrap();

    match zpl_graphic::parse(&text) {
        Ok(bitmap) => {
            println!(
                "Calculated image size: {} x {}",
                bitmap.width(),
                bitmap.height()
            );
            let image = GrayImage::from_raw(bitmap.width(), bitmap.height(), bitmap.to_luma())
                .expect("luma buffer matches the bitmap size");
            image.save(&args[2]).unwrap();
        }
        Err(err) => println!("Error {:?}", err),
    }
}
