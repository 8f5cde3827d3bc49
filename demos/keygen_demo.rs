//! # Key Generation Demo
//!
//! Generates RSA key pairs, random and seeded, and shows their fingerprints.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example keygen_demo
//! ```

use lambda_crypto::config::KeyGenOptions;
use lambda_crypto::crypto::{fingerprint, generate};
use lambda_crypto::operations;

fn main() {
    println!("=== Lambda Crypto: Key Generation Demo ===\n");

    // Step 1: A random key pair
    println!("Step 1: Generating a random 2048-bit RSA key pair...");

    let keys = generate(2048, None).expect("Failed to generate key pair");

    println!("  Private key: {} bytes (PKCS#8 DER)", keys.private_der().len());
    println!("  Public key:  {} bytes (SPKI DER)", keys.public_der().len());
    println!("  Fingerprint: {}", keys.fingerprint());
    println!();

    // Step 2: Seeded key pairs
    println!("Step 2: Generating twice from the same seed...");

    let seed = b"my very memorable passphrase";
    let first = generate(2048, Some(seed)).expect("Failed to generate key pair");
    let second = generate(2048, Some(seed)).expect("Failed to generate key pair");

    println!("  First:  {}", first.fingerprint());
    println!("  Second: {}", second.fingerprint());

    if first.private_der() == second.private_der() {
        println!("  [OK] Same seed, same key pair");
    } else {
        println!("  [FAILED] Seeded generation is not deterministic!");
    }
    println!();

    // Step 3: Fingerprints are derived from the public key alone
    println!("Step 3: Recomputing the fingerprint from the public key...");

    let recomputed = fingerprint(first.public_der());
    println!("  Recomputed: {}", recomputed);
    println!("  Matches:    {}", recomputed == first.fingerprint());
    println!();

    // Step 4: Through the operation surface
    println!("Step 4: create_key with base64 output...");

    let options = KeyGenOptions {
        strength: 1024,
        seed: Some("demo".into()),
        raw: false,
    };
    let output = operations::create_key(&options).expect("Failed to create key");
    let public = output.public.as_text().unwrap_or_default();

    println!("  Public key (base64): {}...", &public[..public.len().min(48)]);
    println!("  Fingerprint:         {}", output.fingerprint);
    println!();

    println!("=== Demo Complete ===");
}
