fn main() {
    stellar_sign_auth::main();
}
