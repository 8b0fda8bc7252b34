fn main() {
    println!("cargo:rerun-if-changed=bindings.h");

    // Host test builds run without the `espidf` feature and have no embuild.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
