use icoset::{
    encode_ico, encode_rgba_png, parse_ico, FormatError, IconDir, IconEncoder,
};
use proptest::prelude::*;

//===========================================================================//

const EDGE_LENGTHS: &[u32] = &[16, 32, 48, 64, 128, 256];

fn solid_png(edge_length: u32, rgba: [u8; 4]) -> Vec<u8> {
    let pixels: Vec<u8> = rgba
        .iter()
        .cycle()
        .take((4 * edge_length * edge_length) as usize)
        .cloned()
        .collect();
    encode_rgba_png(edge_length, edge_length, &pixels).unwrap()
}

fn read_png_pixels(data: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder.read_info().unwrap();
    let mut buffer = vec![0u8; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buffer).unwrap();
    buffer.truncate(info.buffer_size());
    (info.width, info.height, buffer)
}

//===========================================================================//

#[test]
fn encode_png_images_round_trip() {
    let images: Vec<(u32, Vec<u8>)> = EDGE_LENGTHS
        .iter()
        .map(|&edge| (edge, solid_png(edge, [edge as u8, 0, 255, 128])))
        .collect();
    let ico = encode_ico(images.clone()).unwrap();
    let decoded = parse_ico(&ico).unwrap();
    assert_eq!(decoded.len(), EDGE_LENGTHS.len());
    for (image, (edge, png)) in decoded.iter().zip(images.iter()) {
        assert_eq!(image.width(), *edge);
        assert_eq!(image.height(), *edge);
        assert_eq!(image.bits_per_pixel(), 32);
        assert_eq!(image.byte_size() as usize, png.len());
        assert_eq!(image.png_data(), Some(png.as_slice()));
        let (width, height, pixels) = read_png_pixels(&image.to_png().unwrap());
        assert_eq!((width, height), (*edge, *edge));
        assert_eq!(&pixels[..4], &[*edge as u8, 0, 255, 128]);
    }
}

#[test]
fn directory_fields_are_fixed() {
    let ico = encode_ico(vec![(48, solid_png(48, [1, 2, 3, 4]))]).unwrap();
    let icondir = IconDir::read(&ico).unwrap();
    assert_eq!(icondir.directory().reserved, 0);
    assert_eq!(icondir.directory().image_type, 1);
    assert_eq!(icondir.directory().entry_count, 1);
    let info = icondir.entries()[0].info();
    assert_eq!(info.color_count, 0);
    assert_eq!(info.reserved, 0);
    assert_eq!(info.color_planes, 1);
    assert_eq!(info.bits_per_pixel, 32);
    assert_eq!(info.data_offset, 22);
}

#[test]
fn caller_order_is_preserved() {
    let images = vec![
        (256, b"\x89PNG-large".to_vec()),
        (16, b"\x89PNG-s".to_vec()),
        (48, b"\x89PNG-medium".to_vec()),
    ];
    let ico = encode_ico(images).unwrap();
    let icondir = IconDir::read(&ico).unwrap();
    let widths: Vec<u32> =
        icondir.entries().iter().map(|entry| entry.width()).collect();
    assert_eq!(widths, vec![256, 16, 48]);
    let offsets: Vec<u32> = icondir
        .entries()
        .iter()
        .map(|entry| entry.info().data_offset)
        .collect();
    assert_eq!(offsets, vec![54, 54 + 10, 54 + 10 + 6]);
    assert_eq!(&ico[6..8], &[0, 0]);
    assert_eq!(&ico[22..24], &[16, 16]);
    assert_eq!(&ico[38..40], &[48, 48]);
}

#[test]
fn streaming_matches_buffered() {
    let mut encoder = IconEncoder::new();
    encoder.add_png(32, solid_png(32, [9, 8, 7, 6]));
    encoder.add_png(16, solid_png(16, [5, 4, 3, 2]));
    let mut streamed = Vec::new();
    encoder.write(&mut streamed).unwrap();
    assert_eq!(streamed, encoder.to_bytes().unwrap());
}

#[test]
fn edge_length_out_of_range() {
    match encode_ico(vec![(16, vec![0x89]), (65536, vec![0x89])]) {
        Err(FormatError::SizeOutOfRange { edge_length: 65536 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
    match encode_ico(vec![(0, vec![0x89])]) {
        Err(FormatError::SizeOutOfRange { edge_length: 0 }) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

//===========================================================================//

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn encode_then_parse_preserves_images(
        images in proptest::collection::vec(
            (
                proptest::sample::select(EDGE_LENGTHS),
                proptest::collection::vec(any::<u8>(), 0..64),
            ),
            1..=16,
        )
    ) {
        let images: Vec<(u32, Vec<u8>)> = images
            .into_iter()
            .map(|(edge, tail)| {
                let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
                png.extend_from_slice(&tail);
                (edge, png)
            })
            .collect();
        let ico = encode_ico(images.clone()).unwrap();
        let decoded = parse_ico(&ico).unwrap();
        prop_assert_eq!(decoded.len(), images.len());
        let mut expected_offset = 6 + 16 * images.len() as u32;
        let icondir = IconDir::read(&ico).unwrap();
        for (index, (edge, png)) in images.iter().enumerate() {
            prop_assert_eq!(decoded[index].width(), *edge);
            prop_assert_eq!(decoded[index].height(), *edge);
            prop_assert_eq!(decoded[index].png_data(), Some(png.as_slice()));
            let info = icondir.entries()[index].info();
            prop_assert_eq!(info.data_offset, expected_offset);
            expected_offset += png.len() as u32;
        }
        prop_assert_eq!(expected_offset as usize, ico.len());
    }
}

//===========================================================================//
