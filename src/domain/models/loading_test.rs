use super::Loading;

#[test]
fn it_cycles_dots() {
    let mut loading = Loading::default();
    let mut seen = vec![loading.text()];
    for _ in 0..4 {
        loading.tick();
        seen.push(loading.text());
    }

    assert_eq!(seen, vec!["", ".", "..", "...", ""]);
}

#[test]
fn it_resets() {
    let mut loading = Loading::default();
    loading.tick();
    loading.tick();
    loading.reset();

    assert_eq!(loading.text(), "");
}
