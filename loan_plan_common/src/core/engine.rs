//! The amortization engine
//!
//! Pure functions; every amount is rounded to cents as soon as it is computed,
//! because each period starts from the previous period's rounded balance.

use crate::errors::{PlanError, PAYMENT_NOT_FINITE_MSG};
use crate::requests::LoanRequest;
use crate::types::PeriodRecord;
use crate::validation::{validate_duration, validate_loan_amount, validate_request};
use chrono::{DateTime, Months, Utc};
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

const MONTHS_PER_YEAR: u32 = 12;
const PERCENT: u32 = 100;

/// 30/360 day count: every month has 30 days and every year has 360.
const DAYS_PER_MONTH: u32 = 30;
const DAYS_PER_YEAR: u32 = 360;

/// **Rounds to the nearest cent, midpoints away from zero**
fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn not_finite() -> PlanError {
    PlanError::InvalidInput(PAYMENT_NOT_FINITE_MSG.to_string())
}

/// **Computes the fixed monthly payment of an annuity loan**
///
/// `payment = r * P / (1 - (1 + r)^-n)` with `r = nominal_rate / 1200`,
/// rounded to cents. A zero rate splits the loan evenly over the months.
///
/// # Errors
/// - `duration` or `loan_amount` not positive, `PlanError::InvalidInput`;
/// - the payment overflows or is undefined for the given rate, `PlanError::InvalidInput`.
pub fn compute_monthly_payment(
    nominal_rate: Decimal,
    loan_amount: Decimal,
    duration: i64,
) -> Result<Decimal, PlanError> {
    validate_duration(duration)?;
    validate_loan_amount(loan_amount)?;

    let months = Decimal::from(duration);
    let rate = nominal_rate / Decimal::from(MONTHS_PER_YEAR * PERCENT);

    let base = Decimal::ONE.checked_add(rate).ok_or_else(not_finite)?;

    // (1 + r)^-n; once (1 + r)^n outgrows Decimal the discount is zero to 28 digits.
    let discount = match base.checked_powu(duration.unsigned_abs()) {
        Some(growth) => Decimal::ONE.checked_div(growth).ok_or_else(not_finite)?,
        None if base > Decimal::ONE => Decimal::ZERO,
        None => return Err(not_finite()),
    };
    let annuity_factor = Decimal::ONE - discount;

    // A rate too small to move the discount off 1 is a zero rate, too.
    if nominal_rate.is_zero() || annuity_factor.is_zero() {
        return Ok(round2(loan_amount / months));
    }

    let payment = rate
        .checked_mul(loan_amount)
        .and_then(|numerator| numerator.checked_div(annuity_factor))
        .ok_or_else(not_finite)?;

    if payment <= Decimal::ZERO {
        return Err(not_finite());
    }

    Ok(round2(payment))
}

/// **Interest accrued over one month on `balance`, 30/360**
fn monthly_interest(nominal_rate: Decimal, balance: Decimal) -> Result<Decimal, PlanError> {
    let interest = (nominal_rate / Decimal::from(PERCENT))
        .checked_mul(Decimal::from(DAYS_PER_MONTH))
        .and_then(|accrual| accrual.checked_mul(balance))
        .map(|accrual| accrual / Decimal::from(DAYS_PER_YEAR))
        .ok_or_else(not_finite)?;

    Ok(round2(interest))
}

/// **Generates the full amortization schedule**
///
/// Produces exactly `duration` records. The payment is fixed, except that
/// a period never repays more principal than is outstanding, and the last
/// period repays whatever is left, so the final balance is exactly zero.
///
/// Period `i` is dated `start_date` plus `i` months; a day that doesn't exist
/// in the target month is clamped to that month's last day.
///
/// # Errors
/// Whatever [`compute_monthly_payment`] fails with, and `PlanError::InvalidInput`
/// when an amount overflows. Nothing is returned on failure.
pub fn generate_schedule(
    loan_amount: Decimal,
    nominal_rate: Decimal,
    duration: i64,
    start_date: DateTime<Utc>,
) -> Result<Vec<PeriodRecord>, PlanError> {
    let payment = compute_monthly_payment(nominal_rate, loan_amount, duration)?;
    log::debug!("monthly payment: {}", payment);

    let periods = u32::try_from(duration).map_err(|_| not_finite())?;
    let mut schedule = Vec::with_capacity(periods as usize);
    let mut remaining = loan_amount;

    for i in 0..periods {
        let initial = remaining;
        let interest = monthly_interest(nominal_rate, initial)?;
        let mut annuity = payment;
        let mut principal = round2(annuity.checked_sub(interest).ok_or_else(not_finite)?);

        let is_last = i + 1 == periods;
        if principal > initial || is_last {
            principal = initial;
            annuity = principal.checked_add(interest).ok_or_else(not_finite)?;
        }

        remaining = round2(initial - principal);

        let date = start_date
            .checked_add_months(Months::new(i))
            .ok_or_else(|| PlanError::InvalidInput(format!("date out of range in month {}", i)))?;

        schedule.push(PeriodRecord {
            borrower_payment_amount: annuity,
            date,
            initial_outstanding_principal: initial,
            interest,
            principal,
            remaining_outstanding_principal: remaining,
        });
    }

    Ok(schedule)
}

/// **Generates the schedule for a decoded request**
pub fn generate_plan(request: &LoanRequest) -> Result<Vec<PeriodRecord>, PlanError> {
    validate_request(request)?;

    generate_schedule(
        request.loan_amount,
        request.nominal_rate,
        request.duration,
        request.start_date,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::MAX_DURATION_MONTHS;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn jan_first_2018() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap()
    }

    /// (payment, opening, interest, principal, closing) for 5000 at 5% over 24 months
    fn reference() -> Vec<(Decimal, Decimal, Decimal, Decimal, Decimal)> {
        vec![
            (dec!(219.36), dec!(5000), dec!(20.83), dec!(198.53), dec!(4801.47)),
            (dec!(219.36), dec!(4801.47), dec!(20.01), dec!(199.35), dec!(4602.12)),
            (dec!(219.36), dec!(4602.12), dec!(19.18), dec!(200.18), dec!(4401.94)),
            (dec!(219.36), dec!(4401.94), dec!(18.34), dec!(201.02), dec!(4200.92)),
            (dec!(219.36), dec!(4200.92), dec!(17.50), dec!(201.86), dec!(3999.06)),
            (dec!(219.36), dec!(3999.06), dec!(16.66), dec!(202.70), dec!(3796.36)),
            (dec!(219.36), dec!(3796.36), dec!(15.82), dec!(203.54), dec!(3592.82)),
            (dec!(219.36), dec!(3592.82), dec!(14.97), dec!(204.39), dec!(3388.43)),
            (dec!(219.36), dec!(3388.43), dec!(14.12), dec!(205.24), dec!(3183.19)),
            (dec!(219.36), dec!(3183.19), dec!(13.26), dec!(206.10), dec!(2977.09)),
            (dec!(219.36), dec!(2977.09), dec!(12.40), dec!(206.96), dec!(2770.13)),
            (dec!(219.36), dec!(2770.13), dec!(11.54), dec!(207.82), dec!(2562.31)),
            (dec!(219.36), dec!(2562.31), dec!(10.68), dec!(208.68), dec!(2353.63)),
            (dec!(219.36), dec!(2353.63), dec!(9.81), dec!(209.55), dec!(2144.08)),
            (dec!(219.36), dec!(2144.08), dec!(8.93), dec!(210.43), dec!(1933.65)),
            (dec!(219.36), dec!(1933.65), dec!(8.06), dec!(211.30), dec!(1722.35)),
            (dec!(219.36), dec!(1722.35), dec!(7.18), dec!(212.18), dec!(1510.17)),
            (dec!(219.36), dec!(1510.17), dec!(6.29), dec!(213.07), dec!(1297.10)),
            (dec!(219.36), dec!(1297.10), dec!(5.40), dec!(213.96), dec!(1083.14)),
            (dec!(219.36), dec!(1083.14), dec!(4.51), dec!(214.85), dec!(868.29)),
            (dec!(219.36), dec!(868.29), dec!(3.62), dec!(215.74), dec!(652.55)),
            (dec!(219.36), dec!(652.55), dec!(2.72), dec!(216.64), dec!(435.91)),
            (dec!(219.36), dec!(435.91), dec!(1.82), dec!(217.54), dec!(218.37)),
            (dec!(219.28), dec!(218.37), dec!(0.91), dec!(218.37), dec!(0)),
        ]
    }

    /// Checks chaining, conservation, zeroing, count and dates.
    fn assert_well_formed(
        schedule: &[PeriodRecord],
        loan_amount: Decimal,
        duration: i64,
        start_date: DateTime<Utc>,
    ) {
        assert_eq!(schedule.len() as i64, duration);
        assert_eq!(schedule[0].initial_outstanding_principal, loan_amount);
        assert_eq!(
            schedule.last().unwrap().remaining_outstanding_principal,
            Decimal::ZERO
        );

        for (i, record) in schedule.iter().enumerate() {
            assert_eq!(
                record.principal + record.interest,
                record.borrower_payment_amount,
                "period {}",
                i
            );
            assert_eq!(
                record.date,
                start_date.checked_add_months(Months::new(i as u32)).unwrap()
            );
            assert!(record.principal <= record.initial_outstanding_principal);
        }

        for pair in schedule.windows(2) {
            assert_eq!(
                pair[0].remaining_outstanding_principal,
                pair[1].initial_outstanding_principal
            );
        }
    }

    #[test]
    fn monthly_payment_reference() {
        assert_eq!(
            Ok(dec!(219.36)),
            compute_monthly_payment(dec!(5.0), dec!(5000.00), 24)
        );
    }

    #[test]
    fn monthly_payment_single_month() {
        assert_eq!(
            Ok(dec!(1010.00)),
            compute_monthly_payment(dec!(12), dec!(1000), 1)
        );
    }

    #[test]
    fn monthly_payment_zero_rate_splits_evenly() {
        assert_eq!(
            Ok(dec!(333.33)),
            compute_monthly_payment(Decimal::ZERO, dec!(1000), 3)
        );
        assert_eq!(
            Ok(dec!(100)),
            compute_monthly_payment(dec!(0.00), dec!(1200), 12)
        );
    }

    #[test]
    fn monthly_payment_rejects_bad_input() {
        for (amount, duration) in [
            (dec!(5000), 0),
            (dec!(5000), -1),
            (dec!(0), 24),
            (dec!(-5000), 24),
        ] {
            assert!(matches!(
                compute_monthly_payment(dec!(5), amount, duration),
                Err(PlanError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn monthly_payment_rejects_overflow() {
        assert_eq!(
            Err(not_finite()),
            compute_monthly_payment(dec!(2400), Decimal::MAX, 24)
        );
    }

    #[test]
    fn monthly_payment_long_duration_high_rate() {
        // (1 + r)^n exceeds Decimal here; the payment tends to r * P
        assert_eq!(
            Ok(dec!(583.33)),
            compute_monthly_payment(dec!(70), dec!(10000), MAX_DURATION_MONTHS)
        );
        assert_eq!(
            Ok(dec!(833.33)),
            compute_monthly_payment(dec!(100), dec!(10000), 1000)
        );
        assert_eq!(
            Ok(dec!(500.00)),
            compute_monthly_payment(dec!(60), dec!(10000), MAX_DURATION_MONTHS)
        );
    }

    #[test]
    fn schedule_long_duration_high_rate_zeroes_out() {
        let schedule =
            generate_schedule(dec!(10000), dec!(70), MAX_DURATION_MONTHS, jan_first_2018())
                .unwrap();
        assert_well_formed(&schedule, dec!(10000), MAX_DURATION_MONTHS, jan_first_2018());
    }

    #[test]
    fn monthly_payment_rejects_rate_wiping_out_the_loan() {
        // (1 + r) == 0, the payment is undefined
        assert_eq!(
            Err(not_finite()),
            compute_monthly_payment(dec!(-1200), dec!(1000), 12)
        );
    }

    #[test]
    fn schedule_matches_reference() {
        let schedule = generate_schedule(dec!(5000.00), dec!(5.0), 24, jan_first_2018()).unwrap();

        for (i, (record, expected)) in schedule.iter().zip(reference()).enumerate() {
            let (payment, opening, interest, principal, closing) = expected;
            assert_eq!(record.borrower_payment_amount, payment, "period {}", i);
            assert_eq!(record.initial_outstanding_principal, opening, "period {}", i);
            assert_eq!(record.interest, interest, "period {}", i);
            assert_eq!(record.principal, principal, "period {}", i);
            assert_eq!(record.remaining_outstanding_principal, closing, "period {}", i);
        }

        assert_eq!(
            schedule[23].date,
            Utc.with_ymd_and_hms(2019, 12, 1, 0, 0, 0).unwrap()
        );
        assert_well_formed(&schedule, dec!(5000), 24, jan_first_2018());
    }

    #[test]
    fn schedule_properties_hold() {
        let start = Utc.with_ymd_and_hms(2021, 3, 15, 9, 30, 0).unwrap();

        for (amount, rate, duration) in [
            (dec!(100000), dec!(3.5), 360),
            (dec!(1234.56), dec!(19.99), 7),
            (dec!(250000), dec!(0.75), 120),
            (dec!(1000), dec!(12), 1),
            (dec!(99.99), dec!(7.25), 36),
        ] {
            let schedule = generate_schedule(amount, rate, duration, start).unwrap();
            assert_well_formed(&schedule, amount, duration, start);
        }
    }

    #[test]
    fn zero_rate_schedule_zeroes_out() {
        let schedule = generate_schedule(dec!(1000), Decimal::ZERO, 3, jan_first_2018()).unwrap();

        assert_eq!(schedule[0].borrower_payment_amount, dec!(333.33));
        assert_eq!(schedule[1].borrower_payment_amount, dec!(333.33));
        // The last month picks up the leftover cent
        assert_eq!(schedule[2].borrower_payment_amount, dec!(333.34));
        assert!(schedule.iter().all(|record| record.interest.is_zero()));
        assert_well_formed(&schedule, dec!(1000), 3, jan_first_2018());
    }

    #[test]
    fn payment_rounding_to_zero_is_repaid_at_the_end() {
        let schedule = generate_schedule(dec!(0.05), Decimal::ZERO, 12, jan_first_2018()).unwrap();

        assert!(schedule[..11]
            .iter()
            .all(|record| record.borrower_payment_amount.is_zero()));
        assert_eq!(schedule[11].borrower_payment_amount, dec!(0.05));
        assert_well_formed(&schedule, dec!(0.05), 12, jan_first_2018());
    }

    #[test]
    fn dates_clamp_to_month_end_without_drifting() {
        let start = Utc.with_ymd_and_hms(2020, 1, 31, 12, 45, 30).unwrap();
        let schedule = generate_schedule(dec!(3000), dec!(4), 4, start).unwrap();

        let dates = schedule
            .iter()
            .map(|record| record.date)
            .collect::<Vec<_>>();
        assert_eq!(
            dates,
            vec![
                Utc.with_ymd_and_hms(2020, 1, 31, 12, 45, 30).unwrap(),
                Utc.with_ymd_and_hms(2020, 2, 29, 12, 45, 30).unwrap(),
                Utc.with_ymd_and_hms(2020, 3, 31, 12, 45, 30).unwrap(),
                Utc.with_ymd_and_hms(2020, 4, 30, 12, 45, 30).unwrap(),
            ]
        );
    }

    #[test]
    fn schedule_rejects_bad_input_without_output() {
        assert!(matches!(
            generate_schedule(dec!(5000), dec!(5), 0, jan_first_2018()),
            Err(PlanError::InvalidInput(_))
        ));
        assert!(matches!(
            generate_schedule(dec!(0), dec!(5), 24, jan_first_2018()),
            Err(PlanError::InvalidInput(_))
        ));
        assert!(matches!(
            generate_schedule(dec!(-1), dec!(5), 24, jan_first_2018()),
            Err(PlanError::InvalidInput(_))
        ));
    }

    #[test]
    fn schedule_is_deterministic() {
        let first = generate_schedule(dec!(7500), dec!(6.1), 48, jan_first_2018()).unwrap();
        let second = generate_schedule(dec!(7500), dec!(6.1), 48, jan_first_2018()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn plan_from_request() {
        let request = LoanRequest {
            loan_amount: dec!(5000),
            nominal_rate: dec!(5),
            duration: 24,
            start_date: jan_first_2018(),
        };

        let schedule = generate_plan(&request).unwrap();
        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule[0].borrower_payment_amount, dec!(219.36));
    }

    #[test]
    fn plan_rejects_too_long_duration() {
        let request = LoanRequest {
            loan_amount: dec!(5000),
            nominal_rate: dec!(5),
            duration: 1201,
            start_date: jan_first_2018(),
        };

        assert!(matches!(
            generate_plan(&request),
            Err(PlanError::InvalidInput(_))
        ));
    }
}
