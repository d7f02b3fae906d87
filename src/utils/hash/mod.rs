use sha3::{
    Digest,
    Sha3_256
};

/// SHA3-256 digest of a label; curves map it into their scalar field.
pub fn sha3_digest(data: &str) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable() {
        assert_eq!(sha3_digest("ATTR1"), sha3_digest("ATTR1"));
        assert_ne!(sha3_digest("ATTR1"), sha3_digest("ATTR2"));
    }
}
