fn main() -> anyhow::Result<()> {
    fun::driver::main()
}
