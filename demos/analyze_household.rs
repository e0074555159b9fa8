use chrono::NaiveDate;
use personal_finance_analyzer::*;

fn main() {
    println!("📊 Household Analysis Demo\n");

    let snapshot = FinancialSnapshot {
        incomes: vec![
            IncomeRecord {
                name: "Salary".to_string(),
                amount: 2100.0,
                recurrence: RecurrencePeriod::Biweekly,
            },
            IncomeRecord {
                name: "Tax refund".to_string(),
                amount: 1800.0,
                recurrence: RecurrencePeriod::OneTime,
            },
        ],
        expenses: vec![
            ExpenseRecord {
                name: "Rent".to_string(),
                amount: 1650.0,
                recurrence: RecurrencePeriod::Monthly,
                classification: ExpenseClassification::Fixed,
                category: CategoryRef {
                    name: "Housing".to_string(),
                    kind: CategoryKind::Necessity,
                },
            },
            ExpenseRecord {
                name: "Groceries".to_string(),
                amount: 140.0,
                recurrence: RecurrencePeriod::Weekly,
                classification: ExpenseClassification::Variable,
                category: CategoryRef {
                    name: "Food".to_string(),
                    kind: CategoryKind::Necessity,
                },
            },
            ExpenseRecord {
                name: "Restaurants".to_string(),
                amount: 320.0,
                recurrence: RecurrencePeriod::Monthly,
                classification: ExpenseClassification::Variable,
                category: CategoryRef {
                    name: "Dining".to_string(),
                    kind: CategoryKind::Want,
                },
            },
            ExpenseRecord {
                name: "Index fund".to_string(),
                amount: 200.0,
                recurrence: RecurrencePeriod::Monthly,
                classification: ExpenseClassification::Fixed,
                category: CategoryRef {
                    name: "Investments".to_string(),
                    kind: CategoryKind::Savings,
                },
            },
        ],
        debts: vec![
            DebtRecord {
                name: "Credit card".to_string(),
                balance: 4200.0,
                monthly_payment: 180.0,
                interest_rate_percent: Some(6.5),
                remaining_installments: None,
            },
            DebtRecord {
                name: "Car loan".to_string(),
                balance: 9800.0,
                monthly_payment: 310.0,
                interest_rate_percent: Some(1.1),
                remaining_installments: Some(38),
            },
            DebtRecord {
                name: "Family loan".to_string(),
                balance: 1500.0,
                monthly_payment: 100.0,
                interest_rate_percent: None,
                remaining_installments: None,
            },
        ],
    };

    let analyzer = FinancialAnalyzer::new(AnalysisOptions {
        projection_start: NaiveDate::from_ymd_opt(2025, 1, 1),
        ..AnalysisOptions::default()
    });

    let result = match analyzer.analyze_validated(&snapshot) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            return;
        }
    };

    let s = &result.statement;
    println!("📋 Income statement (monthly):");
    println!("  Net income:          ${:>10.2}", s.net_income);
    println!("  Operating expenses:  ${:>10.2}", s.operating_expenses.total);
    println!("  Operating result:    ${:>10.2}", s.operating_result);
    println!("  Debt service:        ${:>10.2}", s.financing_expenses.total);
    println!("  Net result:          ${:>10.2}", s.net_result);
    println!("  Net margin:           {:>10.1}%", s.net_margin);

    println!("\n🩺 Health:");
    println!(
        "  Score: {}/100  Risk: {:?}  Outlook: {:?}",
        result.score(),
        result.risk_tier,
        result.summary.outlook
    );
    println!(
        "  Current ratio {:.2}, debt service {:.1}%, savings rate {:.1}%",
        result.indicators.current_ratio,
        result.indicators.debt_service_ratio,
        result.indicators.savings_rate
    );

    let d = &result.debt_analysis;
    println!("\n💳 Debt payoff:");
    println!(
        "  Current pace: {} months, ${:.2} interest",
        d.months_to_payoff_current, d.total_interest_if_current
    );
    for plan in [&d.avalanche_plan, &d.snowball_plan] {
        println!(
            "  {:?}: {} months, ${:.2} interest, ${:.2}/month",
            plan.strategy, plan.months_to_payoff, plan.total_interest_paid, plan.monthly_budget
        );
    }
    println!("  Recommended: {:?}", d.recommended_strategy);

    println!("\n📈 Cash flow:");
    for entry in &result.cash_flow {
        println!(
            "  {}: ${:>9.2}  cumulative ${:>10.2}",
            entry.label, entry.balance, entry.cumulative_balance
        );
    }

    println!("\n⚠️  Critical points:");
    if result.critical_points.is_empty() {
        println!("  none");
    }
    for point in &result.critical_points {
        println!("  {:?}", point);
    }
}
