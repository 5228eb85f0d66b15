use std::cmp::Ordering;

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

/// Resizes a program-owned account to `new_size` bytes, keeping it rent exempt.
///
/// Growth is paid by `payer` through a system program transfer. On shrink the
/// excess rent is moved back to `payer` directly, the program owns the account.
pub fn resize_account<'info>(
    account: &AccountInfo<'info>,
    new_size: usize,
    payer: &AccountInfo<'info>,
    system_program: &AccountInfo<'info>,
) -> Result<()> {
    let current_size = account.data_len();
    if new_size == current_size {
        return Ok(());
    }

    let rent = Rent::get()?;
    let current_rent = rent.minimum_balance(current_size);
    let required_rent = rent.minimum_balance(new_size);

    match required_rent.cmp(&current_rent) {
        Ordering::Greater => {
            let top_up = required_rent - current_rent;
            if payer.lamports() < top_up {
                return Err(ProgramError::InsufficientFunds.into());
            }

            transfer(
                CpiContext::new(
                    system_program.clone(),
                    Transfer {
                        from: payer.clone(),
                        to: account.clone(),
                    },
                ),
                top_up,
            )?;
            account.resize(new_size)?;
        }
        Ordering::Less => {
            account.resize(new_size)?;

            let refund = current_rent - required_rent;
            let remaining = account
                .lamports()
                .checked_sub(refund)
                .ok_or(ProgramError::InsufficientFunds)?;
            **account.try_borrow_mut_lamports()? = remaining;
            **payer.try_borrow_mut_lamports()? += refund;
        }
        Ordering::Equal => account.resize(new_size)?,
    }

    msg!("Resized account {} from {} to {} bytes", account.key, current_size, new_size);

    Ok(())
}
