fn main() {
    slint_build::compile("ui/selector.slint").unwrap();
}
