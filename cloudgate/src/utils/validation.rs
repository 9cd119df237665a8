use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

static BUCKET_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9.-]{1,61}[a-z0-9]$").expect("bucket name pattern is valid")
});

/// S3 general purpose bucket naming rules: 3-63 characters of lowercase
/// letters, digits, dots and hyphens, alphanumeric at both ends, no adjacent
/// dots, not shaped like an IPv4 address.
pub fn is_valid_bucket_name(name: &str) -> bool {
    BUCKET_NAME.is_match(name)
        && !name.contains("..")
        && !name.contains(".-")
        && !name.contains("-.")
        && name.parse::<Ipv4Addr>().is_err()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_dns_compatible_names() {
        assert!(is_valid_bucket_name("my-bucket"));
        assert!(is_valid_bucket_name("logs.2024.example"));
        assert!(is_valid_bucket_name("abc"));
    }

    #[test]
    fn rejects_names_the_provider_rejects() {
        assert!(!is_valid_bucket_name(""));
        assert!(!is_valid_bucket_name("ab"));
        assert!(!is_valid_bucket_name("My-Bucket"));
        assert!(!is_valid_bucket_name("-bucket"));
        assert!(!is_valid_bucket_name("bucket-"));
        assert!(!is_valid_bucket_name("my..bucket"));
        assert!(!is_valid_bucket_name("my_bucket"));
        assert!(!is_valid_bucket_name("192.168.5.4"));
        assert!(!is_valid_bucket_name(&"a".repeat(64)));
    }
}
