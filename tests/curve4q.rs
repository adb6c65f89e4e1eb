//! Tests exercising the public Diffie-Hellman API end to end.

use curve4q_dalek::{
    scalar_base_mult, scalar_mult, Curve4QError, EphemeralSecret, PublicKey, BASEPOINT_BYTES,
};

use rand::RngCore;

fn random_secret() -> [u8; 32] {
    let mut sk = [0u8; 32];
    rand::rng().fill_bytes(&mut sk);
    sk
}

#[test]
fn known_answer_vectors() {
    let sk_a: [u8; 32] = hex::decode(
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
    )
    .unwrap()
    .try_into()
    .unwrap();
    let sk_b: [u8; 32] = hex::decode(
        "6465666768696a6b6c6d6e6f707172737475767778797a7b7c7d7e7f80818283",
    )
    .unwrap()
    .try_into()
    .unwrap();

    let pk_a = scalar_base_mult(&sk_a).unwrap();
    let pk_b = scalar_base_mult(&sk_b).unwrap();
    assert_eq!(
        hex::encode(pk_a),
        "1c183b0b075cb7ffe08b71474bf3f34a44303f5bff8b41ded74d3b43df1f8d46"
    );
    assert_eq!(
        hex::encode(pk_b),
        "3e5e93b93f1e79f1af55878cf3cb0f28869730ba8c6452d5f48c8546b4ef479f"
    );

    let shared_a = scalar_mult(&sk_a, &pk_b).unwrap();
    let shared_b = scalar_mult(&sk_b, &pk_a).unwrap();
    assert_eq!(shared_a, shared_b);
    assert_eq!(
        hex::encode(shared_a),
        "30790b6243d53626f9a6a3881941343827218125fa6013045add6fcbe509e317"
    );
}

#[test]
fn symmetry_over_random_pairs() {
    for _ in 0..100 {
        let a = random_secret();
        let b = random_secret();

        let pk_a = scalar_base_mult(&a).unwrap();
        let pk_b = scalar_base_mult(&b).unwrap();

        let shared_ab = scalar_mult(&a, &pk_b).unwrap();
        let shared_ba = scalar_mult(&b, &pk_a).unwrap();
        assert_eq!(shared_ab, shared_ba);
    }
}

#[test]
fn base_mult_agrees_with_explicit_basepoint() {
    // scalar_base_mult(sk) must equal scalar_mult(sk, encode(G)).
    for _ in 0..10 {
        let sk = random_secret();
        assert_eq!(
            scalar_base_mult(&sk).unwrap(),
            scalar_mult(&sk, &BASEPOINT_BYTES).unwrap()
        );
    }
}

#[test]
fn reserved_bit_peer_is_rejected() {
    let sk = random_secret();
    let mut peer = BASEPOINT_BYTES;
    peer[15] |= 0x80;
    assert_eq!(scalar_mult(&sk, &peer), Err(Curve4QError::MalformedPoint));
}

#[test]
fn off_curve_peer_is_rejected() {
    let sk = random_secret();
    // y = 2 is not a valid y-coordinate.
    let mut peer = [0u8; 32];
    peer[0] = 2;
    assert_eq!(scalar_mult(&sk, &peer), Err(Curve4QError::MalformedPoint));
}

#[test]
fn typed_and_byte_apis_agree() {
    let alice_secret = EphemeralSecret::random_from_rng(&mut rand::rng());
    let alice_public = PublicKey::from(&alice_secret);

    let bob = random_secret();
    let bob_public_bytes = scalar_base_mult(&bob).unwrap();
    let bob_public = PublicKey::from(bob_public_bytes);

    let shared_typed = alice_secret.diffie_hellman(&bob_public).unwrap();
    let shared_bytes = scalar_mult(&bob, alice_public.as_bytes()).unwrap();
    assert_eq!(shared_typed.to_bytes(), shared_bytes);
}
