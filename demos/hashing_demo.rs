//! # Hashing Demo
//!
//! Shows the SHA-2 algorithms and the three digest renderings.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example hashing_demo
//! ```

use lambda_crypto::config::HashOptions;
use lambda_crypto::crypto::{DigestAlgorithm, DigestFormat, DigestOutput};
use lambda_crypto::operations;

fn main() {
    println!("=== Lambda Crypto: Hashing Demo ===\n");

    let input = "abc";
    println!("Input: \"{}\"\n", input);

    for algorithm in [DigestAlgorithm::Sha256, DigestAlgorithm::Sha384, DigestAlgorithm::Sha512] {
        println!("{} ({} bytes):", algorithm, algorithm.output_size());

        for format in [DigestFormat::Text, DigestFormat::Fingerprint, DigestFormat::Raw] {
            let output = operations::hash(input, &HashOptions { algorithm, format });
            match output {
                DigestOutput::Text(text) => println!("  {:<12} {}", format, text),
                DigestOutput::Raw(bytes) => println!("  {:<12} {:?}...", format, &bytes[..8]),
            }
        }
        println!();
    }

    // Options can also come from JSON
    let options = HashOptions::from_json(r#"{"algorithm": "SHA384", "format": "fingerprint"}"#)
        .expect("Invalid options");
    println!("From JSON {:?}:", options);
    println!("  {}", operations::hash(input, &options).as_text().unwrap_or_default());
    println!();

    match HashOptions::from_json(r#"{"algorithm": "MD5"}"#) {
        Ok(_) => println!("[FAILED] MD5 should not be accepted"),
        Err(e) => println!("[OK] Rejected: {} (code {})", e, e.code()),
    }
    println!();

    println!("=== Demo Complete ===");
}
