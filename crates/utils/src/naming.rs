use rand::distributions::Alphanumeric;
use rand::Rng;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

fn random_alphanumeric(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Name for a file in the photo directory: `{millis}-{8 base36 chars}.{ext}`.
/// The millisecond prefix is what the listing reads back as the upload time.
pub fn generate_disk_filename(extension: &str) -> String {
    format!("{}-{}.{}", now_millis(), random_base36(8), extension)
}

/// Name for an image kept in the blob store: `photo_{millis}_{16 alnum}.{ext}`
pub fn generate_blob_filename(extension: &str) -> String {
    format!("photo_{}_{}.{}", now_millis(), random_alphanumeric(16), extension)
}

/// Record id for the blob store: `{millis}_{9 base36 chars}`
pub fn generate_image_id() -> String {
    format!("{}_{}", now_millis(), random_base36(9))
}

/// Reads the upload time encoded in front of the first `-` of a filename.
///
/// Only the leading digits count, so `"1700000000000abc-x.png"` still yields a
/// timestamp. Zero or no digits at all means there is no usable prefix.
pub fn parse_timestamp_prefix(filename: &str) -> Option<i64> {
    let head = filename.split('-').next().unwrap_or_default();
    let digits: String = head.chars().take_while(|c| c.is_ascii_digit()).collect();

    match digits.parse::<i64>() {
        Ok(0) | Err(_) => None,
        Ok(ts) => Some(ts),
    }
}

pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_filename_round_trips_timestamp() {
        let before = now_millis();
        let name = generate_disk_filename("png");
        let after = now_millis();

        assert!(name.ends_with(".png"));
        let ts = parse_timestamp_prefix(&name).unwrap();
        assert!(ts >= before && ts <= after);

        let suffix = name.split('-').nth(1).unwrap();
        assert_eq!(suffix.len(), "abcdefgh.png".len());
        assert!(suffix[..8].chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_blob_filename_shape() {
        let name = generate_blob_filename("jpg");
        let parts: Vec<&str> = name.trim_end_matches(".jpg").split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "photo");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 16);
    }

    #[test]
    fn test_image_ids_differ() {
        let a = generate_image_id();
        let b = generate_image_id();
        assert_ne!(a, b);
        assert_eq!(a.split('_').nth(1).unwrap().len(), 9);
    }

    #[test]
    fn test_parse_timestamp_prefix() {
        assert_eq!(parse_timestamp_prefix("1700000000000-ab12cd34.jpg"), Some(1_700_000_000_000));
        assert_eq!(parse_timestamp_prefix("123abc-x.png"), Some(123));
        assert_eq!(parse_timestamp_prefix("holiday.png"), None);
        assert_eq!(parse_timestamp_prefix("0-x.png"), None);
        assert_eq!(parse_timestamp_prefix(""), None);
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0.00 KB");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(10), "0.01 KB");
    }
}
