use num_seq::seq_funcs::{is_pell, lucas_stream, pell_stream};
use num_seq::SeqError;

fn main() -> Result<(), SeqError> {
    // Pell numbers P(n) and Pell-Lucas numbers Q(n) satisfy Q(n)² - 8P(n)² = 4(-1)^n
    let pell = pell_stream(&[0i64, 1])?;
    let pell_lucas = lucas_stream(2i64, -1, &[2, 2])?;

    println!("{:>3} {:>14} {:>14} {:>4}", "n", "P(n)", "Q(n)", "sign");
    for (n, (p, q)) in pell.zip(pell_lucas).take(20).enumerate() {
        let sign = (q * q - 8 * p * p) / 4;
        println!("{:>3} {:>14} {:>14} {:>4}", n, p, q, sign);
    }

    let members: Vec<i64> = (0..1000).filter(|n| is_pell(n, &[0, 1]).unwrap_or(false)).collect();
    println!("Pell numbers under 1000: {:?}", members);
    Ok(())
}
