//! The result schema shared by the benchmark and the renderer.
use serde::{Deserialize, Serialize};

/// Mean timings in milliseconds, one entry per attribute count.
///
/// Field order is the on-disk order of the artifact.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub setup: Vec<f64>,
    pub keygen: Vec<f64>,
    pub encrypt: Vec<f64>,
    pub decrypt: Vec<f64>,
    pub attributes: Vec<usize>,
}

/// The per-attribute operations a chart is drawn for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    KeyGen,
    Encrypt,
    Decrypt,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::KeyGen, Operation::Encrypt, Operation::Decrypt];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::KeyGen => "keygen",
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Operation::KeyGen => "Key Generation",
            Operation::Encrypt => "Encryption",
            Operation::Decrypt => "Decryption",
        }
    }
}

impl ResultRecord {
    pub fn with_capacity(points: usize) -> Self {
        ResultRecord {
            setup: Vec::with_capacity(points),
            keygen: Vec::with_capacity(points),
            encrypt: Vec::with_capacity(points),
            decrypt: Vec::with_capacity(points),
            attributes: Vec::with_capacity(points),
        }
    }

    /// Appends the measurements of one attribute count.
    pub fn push(&mut self, attributes: usize, setup: f64, keygen: f64, encrypt: f64, decrypt: f64) {
        self.attributes.push(attributes);
        self.setup.push(setup);
        self.keygen.push(keygen);
        self.encrypt.push(encrypt);
        self.decrypt.push(decrypt);
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn series(&self, operation: Operation) -> &[f64] {
        match operation {
            Operation::KeyGen => &self.keygen,
            Operation::Encrypt => &self.encrypt,
            Operation::Decrypt => &self.decrypt,
        }
    }

    /// Checks the invariants of a complete sweep and names the first violated one.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.attributes.len();
        if n == 0 {
            return Err(String::from("record has no points"));
        }
        let lengths = [
            ("setup", self.setup.len()),
            ("keygen", self.keygen.len()),
            ("encrypt", self.encrypt.len()),
            ("decrypt", self.decrypt.len()),
        ];
        for (name, len) in lengths.iter() {
            if *len != n {
                return Err(format!("{} has {} points, attributes has {}", name, len, n));
            }
        }
        if self.attributes.iter().enumerate().any(|(i, count)| *count != i + 1) {
            return Err(String::from("attributes must be 1..=N without gaps"));
        }
        let timings = self.setup.iter().chain(&self.keygen).chain(&self.encrypt).chain(&self.decrypt);
        for value in timings {
            if !value.is_finite() || *value < 0.0 {
                return Err(format!("timing {} is not a non-negative finite number", value));
            }
        }
        if self.setup.iter().any(|value| *value != self.setup[0]) {
            return Err(String::from("setup timings are not constant"));
        }
        Ok(())
    }
}
