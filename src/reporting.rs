use crate::runner::SizingRun;

pub fn print_sizing_report(run: &SizingRun) {
    println!("--- Panel Options ---");
    for option in &run.options {
        let marker = if option.index == run.result.selected_index {
            '*'
        } else {
            ' '
        };
        println!("{marker} {option}");
    }
    println!("\n{}", run.result);
}
