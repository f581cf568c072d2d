fn main() {
    restock_frontend::start();
}
