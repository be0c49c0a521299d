pub mod generate_report;
