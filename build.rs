fn main() {
    // Link to IOKit for the idle-sleep assertion held during breaks
    if cfg!(target_os = "macos") {
        println!("cargo:rustc-link-lib=framework=IOKit");
        println!("cargo:rustc-link-lib=framework=CoreFoundation");
    }
    println!("cargo:rerun-if-changed=assets/quotes.json");
}
