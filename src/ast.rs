use std::{convert::Infallible, fmt, mem};

/// An abstract syntax tree (AST) node representing an expression.
///
/// Each variant corresponds to a syntactic construct of the input language.
/// Identifiers are stored lowercase; `i` never appears as a `Variable`.
///
/// Long operator chains produce trees as deep as the chain is long, so
/// cloning, comparing, printing and dropping all use explicit stacks.
#[derive(Debug)]
pub enum Expr {
    /// A number literal kept as its decimal text, e.g. `3.25`.
    Number(String),
    /// A variable reference, e.g. `x`.
    Variable(String),
    /// The imaginary unit `i`.
    Imaginary,
    /// A matrix literal; each inner vector is one row.
    Matrix(Vec<Vec<Self>>),
    /// A binary operation, such as `a + b`.
    BinaryOp {
        /// The operator.
        op:    BinaryOperator,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },
    /// A unary operation, such as `-x`.
    UnaryOp {
        /// The operator.
        op:   UnaryOperator,
        /// The operand.
        expr: Box<Self>,
    },
    /// A single-argument call, such as `f(x + 1)`.
    Call {
        /// The callee name.
        name:     String,
        /// The argument expression.
        argument: Box<Self>,
    },
}

/// A complete input line after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `name = expr`
    Assign {
        /// Variable name.
        name: String,
        /// Value expression.
        expr: Expr,
    },
    /// `name(param) = body`
    FunctionAssign {
        /// Function name.
        name:  String,
        /// Parameter name.
        param: String,
        /// Function body.
        body:  Expr,
    },
    /// `left = right ?` or `left = ?`
    Equation {
        /// Left-hand side.
        left:  Expr,
        /// Right-hand side, `None` for the `expr = ?` query form.
        right: Option<Expr>,
    },
    /// A bare expression.
    Expression(Expr),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `^`
    Pow,
    /// `**`
    MatMul,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// `-`
    Negate,
}

impl BinaryOperator {
    /// The operator as written.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
            Self::MatMul => "**",
        }
    }

    /// The operator with the spacing used when printing expressions.
    const fn infix(self) -> &'static str {
        match self {
            Self::Add => " + ",
            Self::Sub => " - ",
            Self::Mul => " * ",
            Self::Div => " / ",
            Self::Mod => " % ",
            Self::Pow => "^",
            Self::MatMul => " ** ",
        }
    }

    /// Binding strength; higher binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 2,
            Self::Mul | Self::Div | Self::Mod | Self::MatMul => 3,
            Self::Pow => 4,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl UnaryOperator {
    /// The operator as written.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Statement {
    /// Short name of the statement form, for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assignment",
            Self::FunctionAssign { .. } => "function assignment",
            Self::Equation { right: None, .. } => "query",
            Self::Equation { .. } => "equation",
            Self::Expression(_) => "expression",
        }
    }
}

/// One step of a left-leaning operator chain: `node` is `left op right`,
/// where `left` is the previous step.
#[derive(Debug, Clone, Copy)]
pub struct Link<'a> {
    /// The binary node of this step.
    pub node:  &'a Expr,
    /// Its operator.
    pub op:    BinaryOperator,
    /// Its right operand.
    pub right: &'a Expr,
}

impl Expr {
    /// Builds a boxed binary node.
    #[must_use]
    pub fn binary(op: BinaryOperator, left: Self, right: Self) -> Self {
        Self::BinaryOp { op,
                         left: Box::new(left),
                         right: Box::new(right) }
    }

    /// Builds a negation node.
    #[must_use]
    pub fn negate(expr: Self) -> Self {
        Self::UnaryOp { op:   UnaryOperator::Negate,
                        expr: Box::new(expr), }
    }

    /// Direct children in left-to-right order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Number(_) | Self::Variable(_) | Self::Imaginary => Vec::new(),
            Self::Matrix(rows) => rows.iter().flatten().collect(),
            Self::BinaryOp { left, right, .. } => vec![left, right],
            Self::UnaryOp { expr, .. } => vec![expr],
            Self::Call { argument, .. } => vec![argument],
        }
    }

    fn child_count(&self) -> usize {
        match self {
            Self::Number(_) | Self::Variable(_) | Self::Imaginary => 0,
            Self::Matrix(rows) => rows.iter().map(Vec::len).sum(),
            Self::BinaryOp { .. } => 2,
            Self::UnaryOp { .. } | Self::Call { .. } => 1,
        }
    }

    /// Variable names in depth-first, left-to-right order, with repeats.
    #[must_use]
    pub fn variables(&self) -> Vec<&str> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if let Self::Variable(name) = node {
                found.push(name.as_str());
            }
            stack.extend(node.children().into_iter().rev());
        }
        found
    }

    /// `true` if any `Variable` node is named `name`.
    #[must_use]
    pub fn mentions(&self, name: &str) -> bool {
        self.variables().contains(&name)
    }

    /// `true` if the tree contains any `Variable` node.
    #[must_use]
    pub fn has_variables(&self) -> bool {
        !self.variables().is_empty()
    }

    /// Splits the left spine of binary nodes whose operator satisfies
    /// `follow`.
    ///
    /// Returns the innermost left operand and the steps applied to it, in
    /// evaluation order. A node that is not such a binary node comes back
    /// alone with no steps.
    ///
    /// # Example
    /// ```
    /// use computor::{
    ///     ast::{BinaryOperator, Statement},
    ///     config::Limits,
    ///     interpreter::{lexer::tokenize, parser::core::parse},
    /// };
    ///
    /// let tokens = tokenize("a - b + c * d").unwrap();
    /// let Ok(Statement::Expression(expr)) = parse(&tokens, &Limits::default()) else {
    ///     panic!("expected an expression");
    /// };
    /// let (first, links) = expr.left_chain(|_| true);
    /// assert_eq!(first.to_string(), "a");
    /// let steps = links.iter().map(|l| (l.op, l.right.to_string())).collect::<Vec<_>>();
    /// assert_eq!(steps,
    ///            [(BinaryOperator::Sub, "b".to_string()),
    ///             (BinaryOperator::Add, "c * d".to_string())]);
    /// ```
    pub fn left_chain(&self, follow: impl Fn(BinaryOperator) -> bool) -> (&Self, Vec<Link<'_>>) {
        let mut links = Vec::new();
        let mut node = self;
        while let Self::BinaryOp { op, left, right } = node
              && follow(*op)
        {
            links.push(Link { node,
                              op: *op,
                              right: &**right });
            node = &**left;
        }
        links.reverse();
        (node, links)
    }

    /// Like [`Expr::left_chain`], but starts from the largest prefix of the
    /// chain that does not mention `name`.
    ///
    /// The returned start is either that prefix or, when the innermost operand
    /// already mentions `name`, the innermost operand itself.
    pub fn left_chain_from_constant<'a>(&'a self,
                                        name: &str,
                                        follow: impl Fn(BinaryOperator) -> bool)
                                        -> (&'a Self, Vec<Link<'a>>) {
        let (first, links) = self.left_chain(follow);
        if first.mentions(name) {
            return (first, links);
        }
        match links.iter().position(|link| link.right.mentions(name)) {
            Some(0) => (first, links),
            Some(at) => (links[at - 1].node, links[at..].to_vec()),
            None => (self, Vec::new()),
        }
    }

    /// Rebuilds the tree bottom-up with an explicit stack.
    ///
    /// `replace` sees every node before its children. Returning `Some`
    /// substitutes the node, and nothing below it is visited; returning
    /// `None` rebuilds the node from its rebuilt children.
    ///
    /// # Errors
    /// The first error returned by `replace`.
    pub fn try_rebuild<E>(&self,
                          mut replace: impl FnMut(&Self) -> Result<Option<Self>, E>)
                          -> Result<Self, E> {
        enum Step<'a> {
            Visit(&'a Expr),
            Build(&'a Expr),
        }

        let mut steps = vec![Step::Visit(self)];
        let mut built: Vec<Self> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(node) => {
                    if let Some(replacement) = replace(node)? {
                        built.push(replacement);
                        continue;
                    }
                    steps.push(Step::Build(node));
                    steps.extend(node.children().into_iter().rev().map(Step::Visit));
                },
                Step::Build(node) => {
                    let children = built.split_off(built.len() - node.child_count());
                    built.push(node.with_children(children));
                },
            }
        }
        match built.pop() {
            Some(root) => Ok(root),
            None => unreachable!("rebuild always produces the root"),
        }
    }

    /// Infallible form of [`Expr::try_rebuild`].
    #[must_use]
    pub fn rebuild(&self, mut replace: impl FnMut(&Self) -> Option<Self>) -> Self {
        match self.try_rebuild(|node| Ok::<_, Infallible>(replace(node))) {
            Ok(rebuilt) => rebuilt,
            Err(never) => match never {},
        }
    }

    /// A copy of this node holding `children`, which must match
    /// [`Expr::children`] in number and order.
    fn with_children(&self, children: Vec<Self>) -> Self {
        let mut children = children.into_iter();
        let mut next = || match children.next() {
            Some(child) => Box::new(child),
            None => unreachable!("rebuilt node is missing a child"),
        };

        match self {
            Self::Number(text) => Self::Number(text.clone()),
            Self::Variable(name) => Self::Variable(name.clone()),
            Self::Imaginary => Self::Imaginary,
            Self::Matrix(rows) => {
                Self::Matrix(rows.iter()
                                 .map(|row| row.iter().map(|_| *next()).collect())
                                 .collect())
            },
            Self::BinaryOp { op, .. } => {
                let left = next();
                Self::BinaryOp { op: *op,
                                 left,
                                 right: next() }
            },
            Self::UnaryOp { op, .. } => Self::UnaryOp { op:   *op,
                                                        expr: next(), },
            Self::Call { name, .. } => Self::Call { name:     name.clone(),
                                                    argument: next(), },
        }
    }

    /// Compares the node itself, ignoring its children.
    fn same_node(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b))
            | (Self::Variable(a), Self::Variable(b))
            | (Self::Call { name: a, .. }, Self::Call { name: b, .. }) => a == b,
            (Self::Imaginary, Self::Imaginary) => true,
            (Self::Matrix(a), Self::Matrix(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.len() == y.len())
            },
            (Self::BinaryOp { op: a, .. }, Self::BinaryOp { op: b, .. }) => a == b,
            (Self::UnaryOp { op: a, .. }, Self::UnaryOp { op: b, .. }) => a == b,
            _ => false,
        }
    }

    /// Moves the children out, leaving leaves in their place.
    fn detach_children(&mut self, into: &mut Vec<Self>) {
        match self {
            Self::BinaryOp { left, right, .. } => {
                into.push(mem::replace(&mut **left, Self::Imaginary));
                into.push(mem::replace(&mut **right, Self::Imaginary));
            },
            Self::UnaryOp { expr: child, .. } | Self::Call { argument: child, .. } => {
                into.push(mem::replace(&mut **child, Self::Imaginary));
            },
            Self::Matrix(rows) => into.extend(mem::take(rows).into_iter().flatten()),
            Self::Number(_) | Self::Variable(_) | Self::Imaginary => {},
        }
    }

    const fn binding(&self) -> u8 {
        match self {
            Self::BinaryOp { op, .. } => op.precedence(),
            Self::UnaryOp { .. } => 5,
            _ => 6,
        }
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        self.rebuild(|_| None)
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if !a.same_node(b) {
                return false;
            }
            pending.extend(a.children().into_iter().zip(b.children()));
        }
        true
    }
}

impl Eq for Expr {}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_children(&mut detached);
        while let Some(mut node) = detached.pop() {
            node.detach_children(&mut detached);
        }
    }
}

/// Decides which operands of `op` need parentheses so the printed form parses
/// back to the same tree.
///
/// Returns `(left_needs_parens, right_needs_parens)`.
fn operand_parens(op: BinaryOperator, left: &Expr, right: &Expr) -> (bool, bool) {
    let prec = op.precedence();
    match op {
        BinaryOperator::Pow => {
            (matches!(left, Expr::BinaryOp { .. }), right.binding() < prec)
        },
        BinaryOperator::Add | BinaryOperator::Sub => {
            (left.binding() < prec,
             right.binding() <= prec || matches!(right, Expr::UnaryOp { .. }))
        },
        _ => (left.binding() < prec, right.binding() <= prec),
    }
}

/// Pending output of the expression printer.
enum Piece<'a> {
    Node(&'a Expr),
    Text(&'a str),
}

fn push_operand<'a>(pending: &mut Vec<Piece<'a>>, operand: &'a Expr, wrap: bool) {
    if wrap {
        pending.push(Piece::Text(")"));
        pending.push(Piece::Node(operand));
        pending.push(Piece::Text("("));
    } else {
        pending.push(Piece::Node(operand));
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                },
                Piece::Node(node) => node,
            };

            match node {
                Self::Number(text) | Self::Variable(text) => f.write_str(text)?,
                Self::Imaginary => f.write_str("i")?,
                Self::Matrix(rows) => {
                    pending.push(Piece::Text("]"));
                    for (r, row) in rows.iter().enumerate().rev() {
                        pending.push(Piece::Text("]"));
                        for (c, cell) in row.iter().enumerate().rev() {
                            pending.push(Piece::Node(cell));
                            if c > 0 {
                                pending.push(Piece::Text(", "));
                            }
                        }
                        pending.push(Piece::Text("["));
                        if r > 0 {
                            pending.push(Piece::Text("; "));
                        }
                    }
                    pending.push(Piece::Text("["));
                },
                Self::BinaryOp { op, left, right } => {
                    let (wrap_left, wrap_right) = operand_parens(*op, left, right);
                    push_operand(&mut pending, right, wrap_right);
                    pending.push(Piece::Text(op.infix()));
                    push_operand(&mut pending, left, wrap_left);
                },
                Self::UnaryOp { op, expr } => {
                    let wrap = matches!(**expr, Self::BinaryOp { .. } | Self::UnaryOp { .. });
                    push_operand(&mut pending, expr, wrap);
                    pending.push(Piece::Text(op.symbol()));
                },
                Self::Call { name, argument } => {
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(argument));
                    pending.push(Piece::Text("("));
                    pending.push(Piece::Text(name));
                },
            }
        }
        Ok(())
    }
}
