//! # Envelope Demo
//!
//! Alice seals a signed message for Bob; Bob opens it, then checks the
//! signature against the public key he trusts for Alice's fingerprint.
//!
//! ## Run
//!
//! ```bash
//! RUST_LOG=lambda_crypto=debug cargo run --example envelope_demo
//! ```

use lambda_crypto::config::{DecryptOptions, EncryptOptions, KeyGenOptions, SignOptions};
use lambda_crypto::operations::{self, EnvelopeKey, Payload};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lambda_crypto=info".into()),
        )
        .init();

    println!("=== Lambda Crypto: Envelope Demo ===\n");

    // Step 1: Both parties create key pairs
    println!("Step 1: Creating key pairs for Alice and Bob...");

    let alice = operations::create_key(&KeyGenOptions::default()).expect("Failed to create key");
    let bob = operations::create_key(&KeyGenOptions::default()).expect("Failed to create key");

    println!("  Alice: {}", alice.fingerprint);
    println!("  Bob:   {}", bob.fingerprint);
    println!();

    // Step 2: Alice seals a message for Bob
    println!("Step 2: Alice seals a signed message for Bob...");

    let message = "Meet me at the usual place at 10.";
    let sealed = operations::encrypt(
        message,
        EnvelopeKey::Rsa(bob.public.as_payload()),
        Some(alice.private.as_payload()),
        &EncryptOptions::default(),
    )
    .expect("Failed to seal");

    let envelope = sealed.envelope.as_text().unwrap_or_default();
    println!("  Envelope (base64): {}...", &envelope[..envelope.len().min(48)]);
    println!("  Envelope length:   {} chars", envelope.len());
    println!();

    // Step 3: The recipient fingerprint is readable without a key
    println!("Step 3: Reading the recipient fingerprint...");

    let recipient = operations::get_key(Payload::Text(envelope)).expect("Malformed envelope");
    println!("  Sealed for: {}", recipient.as_deref().unwrap_or("shared key"));
    println!();

    // Step 4: Bob opens it
    println!("Step 4: Bob opens the envelope...");

    let opened = operations::decrypt(
        Payload::Text(envelope),
        EnvelopeKey::Rsa(bob.private.as_payload()),
        &DecryptOptions::default(),
    )
    .expect("Failed to open");

    println!("  Content:   \"{}\"", opened.content.as_text().unwrap_or_default());
    println!("  Signed by: {}", opened.fingerprint.as_deref().unwrap_or("nobody"));
    println!();

    // Step 5: Bob verifies against the key he trusts for that fingerprint
    println!("Step 5: Verifying the signature...");

    let signature = opened.signature.expect("Message was not signed");
    match operations::rsa_verify(
        opened.content.as_payload(),
        signature.as_payload(),
        alice.public.as_payload(),
        &SignOptions::default(),
    ) {
        Ok(()) => println!("  [OK] Signature is valid, the message is from Alice"),
        Err(e) => println!("  [FAILED] {}", e),
    }
    println!();

    // Step 6: Eve can't open it
    println!("Step 6: Eve tries to open the envelope...");

    let eve = operations::create_key(&KeyGenOptions::default()).expect("Failed to create key");
    match operations::decrypt(
        Payload::Text(envelope),
        EnvelopeKey::Rsa(eve.private.as_payload()),
        &DecryptOptions::default(),
    ) {
        Ok(_) => println!("  [FAILED] Eve opened Bob's envelope!"),
        Err(e) => println!("  [OK] Rejected: {}", e),
    }
    println!();

    println!("=== Demo Complete ===");
}
