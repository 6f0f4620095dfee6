fn f() {
    let (a, _, (b, c)) = t;
}
