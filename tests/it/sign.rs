use predicates::prelude::*;
use stellar_sign_auth::{
    auth::{credentials::SignatureProof, verify::verify_authorizations},
    config::network::{network_id, passphrase},
    xdr::{ScMap, ScVal, SorobanCredentials},
};

use crate::util::{
    address_credentials, address_entry, bump_sequence_op, fee_bump, from_base64, invoke_op,
    operations, plugin, sign, source_account_entry, to_base64, tx_envelope, OTHER_SEED,
    PUBLIC_KEY, SEED,
};

// Payload digest and signature for `address_entry(42)` signed with `SEED` on testnet until
// ledger 1000.
const DIGEST: &str = "21c4586a228bc63b4de612cded9dffa4180e91422f68609d8249700842bf83a7";
const SIGNATURE: &str = "a8704bea56a75cfda6e313dd86f8b31196e5bb3bc3f3896d61db10401507f7546ae2b1c5c3cd1f0973645dc4f8a40426008f12f4148e506f25399942fa20bc0f";

#[test]
fn signs_single_address_entry_deterministically() {
    let txe = tx_envelope(vec![invoke_op(vec![address_entry(42)])]);
    let output = sign(1000)
        .write_stdin(to_base64(&txe))
        .assert()
        .success()
        .stderr(predicate::str::contains(PUBLIC_KEY))
        .stderr(predicate::str::contains(DIGEST))
        .stderr(predicate::str::contains("Authorizing"))
        .stderr(predicate::str::contains("Authorized"))
        .get_output()
        .stdout
        .clone();

    let signed = from_base64(&String::from_utf8(output).unwrap());
    let [creds] = address_credentials(&signed).try_into().unwrap();
    assert_eq!(creds.nonce, 42);
    assert_eq!(creds.signature_expiration_ledger, 1000);

    let ScVal::Map(Some(ScMap(entries))) = &creds.signature else {
        panic!("signature is not a map: {:?}", creds.signature);
    };
    assert_eq!(entries.len(), 2);
    let proof = SignatureProof::try_from(&creds.signature).unwrap();
    assert_eq!(hex::encode(proof.public_key), PUBLIC_KEY);
    assert_eq!(hex::encode(proof.signature), SIGNATURE);

    let [verified] = verify_authorizations(&signed, &network_id(passphrase::TESTNET))
        .unwrap()
        .try_into()
        .unwrap();
    assert_eq!(hex::encode(verified.digest), DIGEST);
}

#[test]
fn signs_every_address_entry_and_nothing_else() {
    let txe = tx_envelope(vec![
        invoke_op(vec![source_account_entry(), address_entry(1)]),
        bump_sequence_op(),
        invoke_op(vec![address_entry(2), address_entry(3)]),
    ]);
    let stdout = sign(2000)
        .arg("--quiet")
        .write_stdin(to_base64(&txe))
        .assert()
        .success()
        .stderr("")
        .get_output()
        .stdout
        .clone();
    let signed = from_base64(&String::from_utf8(stdout).unwrap());

    let creds = address_credentials(&signed);
    assert_eq!(
        creds.iter().map(|c| c.nonce).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(creds.iter().all(|c| c.signature_expiration_ledger == 2000));
    assert_eq!(
        verify_authorizations(&signed, &network_id(passphrase::TESTNET))
            .unwrap()
            .len(),
        3
    );

    let before = operations(&txe);
    let after = operations(&signed);
    assert_eq!(after[1], before[1]);
    let stellar_sign_auth::xdr::OperationBody::InvokeHostFunction(op) = &after[0].body else {
        panic!("expected an invocation");
    };
    assert_eq!(op.auth[0], source_account_entry());
    assert!(matches!(
        op.auth[0].credentials,
        SorobanCredentials::SourceAccount
    ));
}

#[test]
fn envelope_without_address_entries_is_unchanged() {
    let input = to_base64(&tx_envelope(vec![
        invoke_op(vec![source_account_entry()]),
        bump_sequence_op(),
    ]));
    sign(1000)
        .write_stdin(input.clone())
        .assert()
        .success()
        .stdout(format!("{input}\n"))
        .stderr(predicate::str::contains("No authorization entries"));
}

#[test]
fn fee_bump_envelope_is_rejected() {
    let txe = fee_bump(tx_envelope(vec![invoke_op(vec![address_entry(42)])]));
    sign(1000)
        .write_stdin(to_base64(&txe))
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "unsupported transaction envelope type: TxFeeBump",
        ));
}

#[test]
fn resigning_replaces_previous_signature() {
    let txe = tx_envelope(vec![invoke_op(vec![address_entry(42)])]);
    let first = plugin()
        .args([
            "--secret-key",
            OTHER_SEED,
            "--signature-expiration-ledger",
            "500",
            "-q",
        ])
        .write_stdin(to_base64(&txe))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let first_proof = SignatureProof::try_from(
        &address_credentials(&from_base64(&String::from_utf8(first.clone()).unwrap()))[0]
            .signature,
    )
    .unwrap();
    assert_ne!(hex::encode(first_proof.public_key), PUBLIC_KEY);

    let second = sign(1000)
        .arg("-q")
        .write_stdin(first)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let signed = from_base64(&String::from_utf8(second).unwrap());
    let [creds] = address_credentials(&signed).try_into().unwrap();
    assert_eq!(creds.signature_expiration_ledger, 1000);
    let proof = SignatureProof::try_from(&creds.signature).unwrap();
    assert_eq!(hex::encode(proof.public_key), PUBLIC_KEY);
    assert_eq!(hex::encode(proof.signature), SIGNATURE);
}

#[test]
fn signs_for_the_selected_network() {
    let txe = tx_envelope(vec![invoke_op(vec![address_entry(42)])]);
    let stdout = sign(1000)
        .args(["--network", "mainnet", "-q"])
        .write_stdin(to_base64(&txe))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let signed = from_base64(&String::from_utf8(stdout).unwrap());
    assert!(verify_authorizations(&signed, &network_id(passphrase::MAINNET)).is_ok());
    assert!(verify_authorizations(&signed, &network_id(passphrase::TESTNET)).is_err());
}

#[test]
fn custom_network_passphrase() {
    let txe = tx_envelope(vec![invoke_op(vec![address_entry(42)])]);
    let stdout = sign(1000)
        .args(["--network-passphrase", "My Private Network", "-q"])
        .write_stdin(to_base64(&txe))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let signed = from_base64(&String::from_utf8(stdout).unwrap());
    assert!(verify_authorizations(&signed, &network_id("My Private Network")).is_ok());
}

#[test]
fn unknown_network_fails() {
    let txe = tx_envelope(vec![invoke_op(vec![address_entry(42)])]);
    sign(1000)
        .args(["--network", "devnet"])
        .write_stdin(to_base64(&txe))
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("unknown network 'devnet'"));
}

#[test]
fn verify_flag_checks_output() {
    let txe = tx_envelope(vec![invoke_op(vec![address_entry(1), address_entry(2)])]);
    sign(1000)
        .arg("--verify")
        .write_stdin(to_base64(&txe))
        .assert()
        .success()
        .stderr(predicate::str::contains("Verified 2 signature(s)"));
}

#[test]
fn strkey_secret_matches_hex_seed() {
    let txe = to_base64(&tx_envelope(vec![invoke_op(vec![address_entry(42)])]));
    let from_hex = sign(1000)
        .arg("-q")
        .write_stdin(txe.clone())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    plugin()
        .args([
            "--secret-key",
            crate::util::SECRET_KEY,
            "--signature-expiration-ledger",
            "1000",
            "-q",
        ])
        .write_stdin(txe)
        .assert()
        .success()
        .stdout(String::from_utf8(from_hex).unwrap());
}

#[test]
fn reads_configuration_from_env() {
    let txe = to_base64(&tx_envelope(vec![invoke_op(vec![address_entry(42)])]));
    let expected = sign(1000)
        .arg("-q")
        .write_stdin(txe.clone())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let expected = String::from_utf8(expected).unwrap();

    plugin()
        .env("STELLAR_SECRET_KEY", SEED)
        .env("STELLAR_SIGNATURE_EXPIRATION_LEDGER", "1000")
        .arg("-q")
        .write_stdin(txe.clone())
        .assert()
        .success()
        .stdout(expected.clone());

    // The variable names the first version of the plugin read.
    plugin()
        .env("SECRET_KEY", SEED)
        .env("NETWORK_PASSPHRASE", passphrase::TESTNET)
        .env("SIGNATURE_EXPIRATION_LEDGER", "1000")
        .arg("-q")
        .write_stdin(txe)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn missing_secret_key_is_a_usage_error() {
    plugin()
        .args(["--signature-expiration-ledger", "1000"])
        .write_stdin("")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("--secret-key"));
}
