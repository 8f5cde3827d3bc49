//! Benchmarks for the digest, AEAD, RSA and envelope hot paths.
//!
//! ```bash
//! cargo bench --bench primitives
//! ```

criterion::criterion_main!(digest::benches, aead::benches, asymmetric::benches, envelope::benches);

const LENGTHS: [usize; 3] = [64, 1024, 65536];

fn benchid(primitive: &str, algorithm: &str, operation: &str, len: usize) -> String {
    format!("primitive={primitive},algorithm={algorithm},operation={operation},length={len}")
}

mod digest {
    criterion::criterion_group!(benches, bench_digest);

    use criterion::{black_box, Criterion};
    use lambda_crypto::crypto::{digest, DigestAlgorithm, DigestFormat};

    fn bench_digest(c: &mut Criterion) {
        for algorithm in [DigestAlgorithm::Sha256, DigestAlgorithm::Sha384, DigestAlgorithm::Sha512] {
            for len in crate::LENGTHS {
                let data = vec![0x5Au8; len];
                c.bench_function(&crate::benchid("digest", algorithm.name(), "hash", len), |bench| {
                    bench.iter(|| digest(black_box(&data), algorithm, DigestFormat::Fingerprint))
                });
            }
        }
    }
}

mod aead {
    criterion::criterion_group!(benches, bench_aes_gcm);

    use criterion::{black_box, Criterion};
    use lambda_crypto::crypto::symmetric::{decrypt, encrypt};
    use lambda_crypto::SymmetricKey;

    fn bench_aes_gcm(c: &mut Criterion) {
        let key = SymmetricKey::generate();

        for len in crate::LENGTHS {
            let plaintext = vec![0u8; len];
            let packet = encrypt(&plaintext, &key).unwrap();

            c.bench_function(&crate::benchid("aead", "aes256gcm", "encrypt", len), |bench| {
                bench.iter(|| encrypt(black_box(&plaintext), &key).unwrap())
            });
            c.bench_function(&crate::benchid("aead", "aes256gcm", "decrypt", len), |bench| {
                bench.iter(|| decrypt(black_box(&packet), &key).unwrap())
            });
        }
    }
}

mod asymmetric {
    criterion::criterion_group!(benches, bench_rsa);

    use criterion::{black_box, Criterion};
    use lambda_crypto::crypto::{generate, rsa_cipher, sign, verify, DigestAlgorithm};

    fn bench_rsa(c: &mut Criterion) {
        let keys = generate(2048, Some(b"bench")).unwrap();
        let message = [0x42u8; 32];
        let wrapped = rsa_cipher::encrypt(&message, keys.public_der()).unwrap();
        let signature = sign(DigestAlgorithm::Sha256, &message, keys.private_der()).unwrap();

        c.bench_function(&crate::benchid("rsa", "oaep-sha256", "encrypt", 32), |bench| {
            bench.iter(|| rsa_cipher::encrypt(black_box(&message), keys.public_der()).unwrap())
        });
        c.bench_function(&crate::benchid("rsa", "oaep-sha256", "decrypt", 32), |bench| {
            bench.iter(|| rsa_cipher::decrypt(black_box(&wrapped), keys.private_der()).unwrap())
        });
        c.bench_function(&crate::benchid("rsa", "pkcs1v15-sha256", "sign", 32), |bench| {
            bench.iter(|| sign(DigestAlgorithm::Sha256, black_box(&message), keys.private_der()).unwrap())
        });
        c.bench_function(&crate::benchid("rsa", "pkcs1v15-sha256", "verify", 32), |bench| {
            bench.iter(|| {
                verify(DigestAlgorithm::Sha256, black_box(&message), &signature, keys.public_der()).unwrap()
            })
        });
    }
}

mod envelope {
    criterion::criterion_group!(benches, bench_seal_open);

    use criterion::{black_box, Criterion};
    use lambda_crypto::crypto::{generate, DigestAlgorithm};
    use lambda_crypto::{open, seal, OpeningKey, Recipient, Signer};

    fn bench_seal_open(c: &mut Criterion) {
        let sender = generate(2048, Some(b"sender")).unwrap();
        let recipient = generate(2048, Some(b"recipient")).unwrap();
        let signer = Signer {
            private_key: sender.private_der(),
            algorithm: DigestAlgorithm::Sha256,
        };

        let content = vec![0u8; 1024];
        let sealed = seal(&content, Recipient::PublicKey(recipient.public_der()), Some(signer)).unwrap();

        c.bench_function(&crate::benchid("envelope", "rsa2048-aes256gcm", "seal", 1024), |bench| {
            bench.iter(|| {
                seal(black_box(&content), Recipient::PublicKey(recipient.public_der()), Some(signer)).unwrap()
            })
        });
        c.bench_function(&crate::benchid("envelope", "rsa2048-aes256gcm", "open", 1024), |bench| {
            bench.iter(|| {
                open(black_box(&sealed.envelope), OpeningKey::PrivateKey(recipient.private_der())).unwrap()
            })
        });
    }
}
