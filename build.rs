use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();
    let target = env::var("TARGET").unwrap();

    // memory layout for cortex-m-rt
    fs::write(Path::new(&out_dir).join("memory.x"), include_str!("memory.x")).unwrap();
    println!("cargo:rustc-link-search={}", out_dir);

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    if target.starts_with("thumbv") {
        println!("cargo:rustc-link-arg=--nmagic");
        println!("cargo:rustc-link-arg=-Tlink.x");
        println!("cargo:rustc-link-arg=-Tdefmt.x");
    }
}
