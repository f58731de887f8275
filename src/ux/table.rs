use tabled::{Table, Tabled};

use bank_api::{
    account::Account,
    transaction::{AccountRef, Transaction},
    user::{Bank, Identity},
};

const NO_RESULTS: &str = "No results";

#[derive(Debug, Tabled)]
struct AccountRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "TYPE")]
    account_type: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "BALANCE")]
    balance: String,
    #[tabled(rename = "OWNER")]
    owner: String,
}

impl From<&Account> for AccountRow {
    fn from(a: &Account) -> Self {
        Self {
            id: a.id,
            number: a.account_number.clone(),
            account_type: a.account_type.to_string(),
            status: a.account_status.to_string(),
            balance: format!("{:.2}", a.balance),
            owner: a
                .user
                .as_ref()
                .and_then(|u| u.username.clone())
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Tabled)]
struct TransactionRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "REFERENCE")]
    reference: String,
    #[tabled(rename = "TYPE")]
    transaction_type: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "FROM")]
    from: String,
    #[tabled(rename = "TO")]
    to: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
}

fn account_number(account: &Option<AccountRef>) -> String {
    account
        .as_ref()
        .and_then(|a| a.account_number.clone())
        .unwrap_or_else(|| "-".to_string())
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            date: t
                .created_at
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            reference: t.transaction_reference.clone(),
            transaction_type: t.transaction_type.to_string(),
            amount: format!("{:.2}", t.amount),
            status: t.transaction_status.to_string(),
            from: account_number(&t.from_account),
            to: account_number(&t.to_account),
            description: t.description.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Tabled)]
struct UserRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "USERNAME")]
    username: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
    #[tabled(rename = "ROLE")]
    role: String,
    #[tabled(rename = "ACTIVE")]
    active: &'static str,
}

impl From<&Identity> for UserRow {
    fn from(u: &Identity) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            name: u.full_name(),
            email: u.email.clone(),
            role: u.role.to_string(),
            active: if u.active { "yes" } else { "no" },
        }
    }
}

#[derive(Debug, Tabled)]
struct BankRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "CODE")]
    code: String,
}

impl From<&Bank> for BankRow {
    fn from(b: &Bank) -> Self {
        Self {
            id: b.id,
            name: b.bank_name.clone(),
            code: b.bank_code.clone(),
        }
    }
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    if rows.is_empty() {
        return NO_RESULTS.to_string();
    }
    Table::new(rows).to_string()
}

pub fn accounts(accounts: &[Account]) -> String {
    render(accounts.iter().map(AccountRow::from).collect())
}

pub fn transactions(transactions: &[Transaction]) -> String {
    render(transactions.iter().map(TransactionRow::from).collect())
}

pub fn users(users: &[Identity]) -> String {
    render(users.iter().map(UserRow::from).collect())
}

pub fn banks(banks: &[Bank]) -> String {
    render(banks.iter().map(BankRow::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: i64, number: &str) -> Account {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "accountNumber": number,
            "accountType": "SAVINGS",
            "balance": 1500.5,
            "accountStatus": "ACTIVE",
            "user": {"id": 1, "username": "jdoe"}
        }))
        .unwrap()
    }

    #[test]
    fn test_columns_are_aligned() {
        let rendered = accounts(&[account(1, "SAV-001"), account(12, "B")]);
        let lines: Vec<&str> = rendered.lines().collect();
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
        assert!(rendered.contains("| ID | NUMBER  |"));
        assert!(rendered.contains("| 1  | SAV-001 |"));
        assert!(rendered.contains("| 12 | B       |"));
    }

    #[test]
    fn test_accounts_table() {
        let rendered = accounts(&[account(3, "SAV-003")]);
        let row = rendered
            .lines()
            .find(|l| l.contains("SAV-003"))
            .unwrap();
        assert_eq!(
            row,
            "| 3  | SAV-003 | SAVINGS | ACTIVE | 1500.50 | jdoe  |"
        );
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(accounts(&[]), "No results");
        assert_eq!(users(&[]), "No results");
    }
}
