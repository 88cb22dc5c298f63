use crate::lox::scanner::tokens::LiteralValue;

use super::{Binary, Expr, ExprVisitor, Grouping, Literal, Unary};

/// Renders any expression tree as a fully parenthesized string, for
/// debugging and golden-output tests. Printing is a pure function of the
/// tree: operator text comes straight from the originating token's lexeme.
pub struct Printer;

impl Printer {
    pub fn print(&mut self, expr: &Expr) -> String {
        self.visit_expr(expr)
    }

    fn parenthesize(&mut self, name: &str, expressions: Vec<&Expr>) -> String {
        let mut s = format!("({}", name);
        for expr in expressions {
            s.push_str(&format!(" {}", &self.visit_expr(expr)));
        }
        s + ")"
    }
}

impl ExprVisitor<String> for Printer {
    fn visit_expr(&mut self, expr: &Expr) -> String {
        match expr {
            Expr::Binary(binary) => self.visit_binary(binary),
            Expr::Unary(unary) => self.visit_unary(unary),
            Expr::Grouping(grouping) => self.visit_grouping(grouping),
            Expr::Literal(literal) => self.visit_literal(literal),
        }
    }

    fn visit_binary(&mut self, binary: &Binary) -> String {
        self.parenthesize(&binary.operator.lexeme, vec![&binary.left, &binary.right])
    }

    fn visit_unary(&mut self, unary: &Unary) -> String {
        self.parenthesize(&unary.operator.lexeme, vec![&unary.right])
    }

    fn visit_grouping(&mut self, grouping: &Grouping) -> String {
        self.parenthesize("group", vec![&grouping.0])
    }

    fn visit_literal(&mut self, literal: &Literal) -> String {
        match &literal.0 {
            LiteralValue::String(val) => val.clone(),
            LiteralValue::Number(val) => val.to_string(),
            LiteralValue::Boolean(val) => val.to_string(),
            LiteralValue::Nil => "nil".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lox::{
        ast::{Binary, Expr, Grouping, Literal, Unary},
        scanner::tokens::{LiteralValue, Token, TokenType},
    };

    use super::Printer;

    fn example_tree() -> Expr {
        // the tree a parser would build for `-123 * (45.67)`
        Expr::Binary(Binary::new(
            Token::new(TokenType::Star, "*".to_owned(), None, 1),
            Box::new(Expr::Unary(Unary::new(
                Token::new(TokenType::Minus, "-".to_owned(), None, 1),
                Box::new(Expr::Literal(Literal(LiteralValue::Number(123.0)))),
            ))),
            Box::new(Expr::Grouping(Grouping(Box::new(Expr::Literal(Literal(
                LiteralValue::Number(45.67),
            )))))),
        ))
    }

    #[test]
    fn test_ast_printer() {
        let expr = example_tree();
        let mut printer = Printer;
        assert_eq!(printer.print(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_printing_is_deterministic() {
        let expr = example_tree();
        let mut printer = Printer;
        let first = printer.print(&expr);
        // an unrelated print in between must not disturb the next one
        printer.print(&Expr::Literal(Literal(LiteralValue::Boolean(false))));
        let second = printer.print(&expr);
        assert_eq!(first, second);
    }

    #[test]
    fn test_literal_rendering() {
        let mut printer = Printer;
        assert_eq!(printer.print(&Expr::Literal(Literal(LiteralValue::Nil))), "nil");
        assert_eq!(
            printer.print(&Expr::Literal(Literal(LiteralValue::Boolean(true)))),
            "true"
        );
        assert_eq!(
            printer.print(&Expr::Literal(Literal(LiteralValue::String(
                "hi".to_owned()
            )))),
            "hi"
        );
    }

    #[test]
    fn test_unary_uses_operator_lexeme() {
        let expr = Expr::Unary(Unary::new(
            Token::new(TokenType::Bang, "!".to_owned(), None, 1),
            Box::new(Expr::Literal(Literal(LiteralValue::Boolean(true)))),
        ));
        let mut printer = Printer;
        assert_eq!(printer.print(&expr), "(! true)");
    }
}
