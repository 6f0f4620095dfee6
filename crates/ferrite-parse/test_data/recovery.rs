fn f(x) {
    let = 1;
}
