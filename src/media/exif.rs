use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read GPS latitude/longitude (decimal degrees) from a photo's EXIF block.
pub fn extract_gps(path: &Path) -> Result<(f64, f64), Box<dyn std::error::Error>> {
    let file = File::open(path)?;
    let mut bufreader = BufReader::new(file);
    let exif_reader = exif::Reader::new();
    let exif = exif_reader.read_from_container(&mut bufreader)?;

    let latitude = read_axis(&exif, exif::Tag::GPSLatitude, exif::Tag::GPSLatitudeRef, b'S')
        .ok_or("No GPS latitude in EXIF")?;
    let longitude = read_axis(&exif, exif::Tag::GPSLongitude, exif::Tag::GPSLongitudeRef, b'W')
        .ok_or("No GPS longitude in EXIF")?;

    Ok((latitude, longitude))
}

fn read_axis(exif: &exif::Exif, value_tag: exif::Tag, ref_tag: exif::Tag, negative: u8) -> Option<f64> {
    let field = exif.get_field(value_tag, exif::In::PRIMARY)?;
    let parts = match &field.value {
        exif::Value::Rational(parts) if parts.len() >= 3 => parts,
        _ => return None,
    };

    let ratio = |r: &exif::Rational| {
        if r.denom == 0 {
            0.0
        } else {
            r.num as f64 / r.denom as f64
        }
    };
    let decimal = dms_to_decimal(ratio(&parts[0]), ratio(&parts[1]), ratio(&parts[2]));

    // N/E when the reference tag is missing
    let is_negative = exif
        .get_field(ref_tag, exif::In::PRIMARY)
        .and_then(|f| match &f.value {
            exif::Value::Ascii(values) => values.first().and_then(|v| v.first()).copied(),
            _ => None,
        })
        .is_some_and(|c| c.to_ascii_uppercase() == negative);

    Some(if is_negative { -decimal } else { decimal })
}

pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}
