use image::Luma;
use qrcode::QrCode;
use zpl_graphic::{convert, Bitmap, Config, Position, Threshold};
//
// cargo run --example qr_label -- 12345
//

fn main() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "[{}:{}] {} - {}",
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .init();

    let data = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "12345".to_string());

    let qrcode = QrCode::new(data.as_bytes()).unwrap();
    let image = qrcode
        .render::<Luma<u8>>()
        .quiet_zone(false)
        .min_dimensions(200, 200)
        .build();
    let (width, height) = image.dimensions();
    let bitmap = Bitmap::from_luma(width, height, &image.into_raw(), Threshold::default()).unwrap();

    let config = Config::new().label(true).position(Position::new(50, 50));
    match convert(&bitmap, &config) {
        Ok(conversion) => print!("{}", conversion.zpl),
        Err(err) => println!("ERROR {:#?}", err),
    }
}
