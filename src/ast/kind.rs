//! Variant tags and their ancestor chains.
//!
//! Every node reports a [`Kind`]. Kinds form a single-inheritance hierarchy
//! rooted at [`Kind::Node`]; the dispatcher walks it from the concrete tag
//! upwards until it finds a kind the active visitor handles.

/// The tag of a node variant, or of an abstract category above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    // Abstract categories
    Node,
    Unary,
    Binary,
    Nary,
    Ordering,
    Join,
    InfixOperation,
    UnaryOperation,
    Function,
    Statement,
    Value,

    // Terminals
    Table,
    TableAlias,
    Attribute,
    UnqualifiedColumn,
    SqlLiteral,
    BoundSqlLiteral,
    BindParam,
    Quoted,
    Casted,
    True,
    False,
    Distinct,
    CurrentRow,
    List,
    Fragments,
    ValuesList,
    HomogeneousIn,
    RowNumber,
    Comment,
    OptimizerHints,

    // Raw host values
    Null,
    Boolean,
    Integer,
    Float,
    Decimal,
    String,
    Symbol,
    Date,
    Time,
    DateTime,
    Bytes,
    Uuid,

    // Unary
    Not,
    Grouping,
    Ascending,
    Descending,
    NullsFirst,
    NullsLast,
    Offset,
    Limit,
    On,
    Having,
    Group,
    Lock,
    Lateral,
    Cube,
    RollUp,
    GroupingSet,
    GroupingElement,
    DistinctOn,
    Else,
    Bin,
    Extract,
    Preceding,
    Following,
    Rows,
    Range,
    BitwiseNot,
    With,
    WithRecursive,

    // Binary
    Equality,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    NotIn,
    IsDistinctFrom,
    IsNotDistinctFrom,
    As,
    Assignment,
    Between,
    Union,
    UnionAll,
    Intersect,
    Except,
    When,
    Filter,
    Matches,
    DoesNotMatch,
    Regexp,
    NotRegexp,
    Over,
    Cte,
    JoinSource,
    InnerJoin,
    OuterJoin,
    FullOuterJoin,
    RightOuterJoin,
    StringJoin,
    Concat,
    Contains,
    Overlaps,
    Multiplication,
    Division,
    Addition,
    Subtraction,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    BitwiseShiftLeft,
    BitwiseShiftRight,

    // N-ary
    And,
    Or,

    // Functions
    Count,
    Sum,
    Max,
    Min,
    Avg,
    NamedFunction,
    Exists,

    Case,
    Window,
    NamedWindow,

    // Statements
    SelectStatement,
    SelectCore,
    InsertStatement,
    UpdateStatement,
    DeleteStatement,
}

impl Kind {
    /// The declared supertype, or `None` for the universal root.
    pub fn parent(self) -> Option<Kind> {
        use Kind::*;
        let parent = match self {
            Node => return None,

            Unary | Binary | Nary | Function | Statement | Value => Node,
            Ordering => Unary,
            Join | InfixOperation => Binary,
            UnaryOperation => Unary,

            Table | TableAlias | Attribute | UnqualifiedColumn | SqlLiteral | BoundSqlLiteral
            | BindParam | Casted | True | False | Distinct | CurrentRow | List | Fragments
            | ValuesList | HomogeneousIn | RowNumber | Comment => Node,
            Quoted | OptimizerHints => Unary,

            Null | Boolean | Integer | Float | Decimal | String | Symbol | Date | Time
            | DateTime | Bytes | Uuid => Value,

            Ascending | Descending | NullsFirst | NullsLast => Ordering,
            Not | Grouping | Offset | Limit | On | Having | Group | Lock | Lateral | Cube
            | RollUp | GroupingSet | GroupingElement | DistinctOn | Else | Bin | Extract
            | Preceding | Following | Rows | Range | With => Unary,
            WithRecursive => With,
            BitwiseNot => UnaryOperation,

            DoesNotMatch => Matches,
            NotRegexp => Regexp,
            Equality | NotEqual | GreaterThan | GreaterThanOrEqual | LessThan
            | LessThanOrEqual | In | NotIn | IsDistinctFrom | IsNotDistinctFrom | As
            | Assignment | Between | Union | UnionAll | Intersect | Except | When | Filter
            | Matches | Regexp | Over | Cte | JoinSource => Binary,
            InnerJoin | OuterJoin | FullOuterJoin | RightOuterJoin | StringJoin => Join,
            Concat | Contains | Overlaps | Multiplication | Division | Addition | Subtraction
            | BitwiseAnd | BitwiseOr | BitwiseXor | BitwiseShiftLeft | BitwiseShiftRight => {
                InfixOperation
            }

            And | Or => Nary,

            Count | Sum | Max | Min | Avg | NamedFunction | Exists => Function,

            Case | Window | SelectCore => Node,
            NamedWindow => Window,

            SelectStatement | InsertStatement | UpdateStatement | DeleteStatement => Statement,
        };
        Some(parent)
    }

    /// Iterate from this kind up to [`Kind::Node`], most specific first.
    pub fn ancestors(self) -> impl Iterator<Item = Kind> {
        std::iter::successors(Some(self), |k| k.parent())
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
