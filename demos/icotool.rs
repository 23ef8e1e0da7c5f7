use clap::{App, Arg, SubCommand};
use icoset::{DecodePolicy, IconDir, IconEncoder, PayloadKind};
use std::error::Error;
use std::fs;
use std::path::PathBuf;

//===========================================================================//

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new("icotool")
        .version("0.1")
        .about("Inspects, extracts and builds ICO files")
        .subcommand(
            SubCommand::with_name("create")
                .about("Creates an ICO file from square PNG files")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(Arg::with_name("image").multiple(true)),
        )
        .subcommand(
            SubCommand::with_name("extract")
                .about("Extracts one image (or all) from an ICO file as PNG")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output directory"),
                )
                .arg(
                    Arg::with_name("skip-invalid")
                        .long("skip-invalid")
                        .help("Skips malformed entries instead of failing"),
                )
                .arg(Arg::with_name("ico").required(true))
                .arg(Arg::with_name("index")),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists images in an ICO file")
                .arg(Arg::with_name("ico").required(true)),
        )
        .get_matches();
    if let Some(submatches) = matches.subcommand_matches("create") {
        let out_path = if let Some(path) = submatches.value_of("output") {
            PathBuf::from(path)
        } else {
            let mut path = PathBuf::from("out.ico");
            let mut index: i32 = 0;
            while path.exists() {
                index += 1;
                path = PathBuf::from(format!("out{}.ico", index));
            }
            path
        };
        let mut encoder = IconEncoder::new();
        if let Some(paths) = submatches.values_of("image") {
            for path in paths {
                let data = fs::read(path)?;
                let edge_length = png_edge_length(&data)?;
                println!("Adding {:?} ({}px)", path, edge_length);
                encoder.add_png(edge_length, data);
            }
        }
        fs::write(out_path, encoder.to_bytes()?)?;
    } else if let Some(submatches) = matches.subcommand_matches("extract") {
        let path = submatches.value_of("ico").unwrap_or_default();
        let data = fs::read(path)?;
        let policy = if submatches.is_present("skip-invalid") {
            DecodePolicy::SkipInvalid
        } else {
            DecodePolicy::FailFast
        };
        let images = icoset::parse_ico_with(&data, policy)?;
        let out_dir =
            PathBuf::from(submatches.value_of("output").unwrap_or("."));
        let selected: Vec<_> = match submatches.value_of("index") {
            Some(index) => {
                let index = index.parse::<usize>()?;
                match images.get(index) {
                    Some(image) => vec![image],
                    None => {
                        return Err(format!(
                            "{} has only {} images",
                            path,
                            images.len()
                        )
                        .into())
                    }
                }
            }
            None => images.iter().collect(),
        };
        for image in selected {
            let out_path = out_dir.join(image.file_name());
            println!("Writing {:?}", out_path);
            image.write_png(fs::File::create(out_path)?)?;
        }
    } else if let Some(submatches) = matches.subcommand_matches("list") {
        let path = submatches.value_of("ico").unwrap_or_default();
        let data = fs::read(path)?;
        let icondir = IconDir::read(&data)?;
        for (index, entry) in icondir.entries().iter().enumerate() {
            let kind = match entry.kind() {
                PayloadKind::Png => "PNG",
                PayloadKind::Dib => "BMP",
            };
            println!(
                "{:5}: {}x{} {}, {} bpp, {} bytes",
                index,
                entry.width(),
                entry.height(),
                kind,
                entry.info().bits_per_pixel,
                entry.info().data_size
            );
        }
    }
    Ok(())
}

// Reads the PNG header to find the image's edge length.
fn png_edge_length(data: &[u8]) -> Result<u32, Box<dyn Error>> {
    let reader = png::Decoder::new(data).read_info()?;
    let info = reader.info();
    if info.width != info.height {
        return Err(format!(
            "ICO images must be square (got {}x{})",
            info.width, info.height
        )
        .into());
    }
    Ok(info.width)
}

//===========================================================================//
