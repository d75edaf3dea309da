use std::sync::Arc;

use gabc_core::{Deadline, GabcError, Role};
use gabc_preface::{
    generate, handle_preface, DialogueMode, GenerateOptions, Generator, Layout, PrefaceRequest, PrefaceResponse,
};
use gabc_syllabifier::{DictionarySyllabifier, MockSyllabifier, StorePaths, LITURGICAL_FILE};

/// Every word of the Easter I preface, split and stressed as the golden score sings it.
const PASCOA_WORDS: &[(&str, &str, usize)] = &[
    ("na", "na", 1),
    ("verdade", "ver/da/de", 2),
    ("é", "é", 1),
    ("digno", "dig/no", 1),
    ("e", "e", 1),
    ("justo", "jus/to", 1),
    ("nosso", "nos/so", 1),
    ("dever", "de/ver", 2),
    ("salvação", "sal/va/ção", 3),
    ("proclamar", "pro/cla/mar", 3),
    ("vossa", "vos/sa", 1),
    ("glória", "gló/ria", 1),
    ("ó", "ó", 1),
    ("pai", "pai", 1),
    ("em", "em", 1),
    ("todo", "to/do", 1),
    ("tempo", "tem/po", 1),
    ("mas", "mas", 1),
    ("com", "com", 1),
    ("maior", "mai/or", 2),
    ("júbilo", "jú/bi/lo", 1),
    ("louvarvos", "lou/var/vos", 2),
    ("nesta", "nes/ta", 1),
    ("noite", "noi/te", 1),
    ("porque", "por/que", 2),
    ("cristo", "cris/to", 1),
    ("nossa", "nos/sa", 1),
    ("páscoa", "pás/coa", 1),
    ("foi", "foi", 1),
    ("imolado", "i/mo/la/do", 3),
    ("ele", "e/le", 1),
    ("o", "o", 1),
    ("verdadeiro", "ver/da/dei/ro", 3),
    ("cordeiro", "cor/dei/ro", 2),
    ("que", "que", 1),
    ("tirou", "ti/rou", 2),
    ("pecado", "pe/ca/do", 2),
    ("do", "do", 1),
    ("mundo", "mun/do", 1),
    ("morrendo", "mor/ren/do", 2),
    ("destruiu", "des/tru/iu", 3),
    ("a", "a", 1),
    ("morte", "mor/te", 1),
    ("ressurgindo", "res/sur/gin/do", 3),
    ("restaurou", "res/tau/rou", 3),
    ("vida", "vi/da", 1),
    ("por", "por", 1),
    ("isso", "is/so", 1),
    ("transbordando", "trans/bor/dan/do", 3),
    ("de", "de", 1),
    ("alegria", "a/le/gri/a", 3),
    ("pascal", "pas/cal", 2),
    ("exulta", "e/xul/ta", 2),
    ("criação", "cri/a/ção", 3),
    ("toda", "to/da", 1),
    ("terra", "ter/ra", 1),
    ("também", "tam/bém", 2),
    ("as", "as", 1),
    ("virtudes", "vir/tu/des", 2),
    ("celestes", "ce/les/tes", 2),
    ("potestades", "po/tes/ta/des", 3),
    ("angélicas", "an/gé/li/cas", 2),
    ("proclamam", "pro/cla/mam", 2),
    ("um", "um", 1),
    ("hino", "hi/no", 1),
    ("à", "à", 1),
    ("cantando", "can/tan/do", 2),
    ("uma", "u/ma", 1),
    ("só", "só", 1),
    ("voz", "voz", 1),
];

const PASCOA_I: &str = concat!(
    "Na verdade, é digno e justo,\n",
    " é nosso dever e salvação proclamar vossa glória, ó Pai, em todo tempo,\n",
    " mas, com maior júbilo, louvar-vos nesta noite, ( neste dia ou neste tempo )\n",
    " porque Cristo, nossa Páscoa, foi imolado.\n",
    "\n",
    " É ele o verdadeiro Cordeiro, que tirou o pecado do mundo;\n",
    " morrendo, destruiu a nossa morte\n",
    " e, ressurgindo, restaurou a vida.\n",
    "\n",
    " Por isso,\n",
    " transbordando de alegria pascal, exulta a criação por toda a terra;\n",
    " também as Virtudes celestes e as Potestades angélicas proclamam um hino à vossa glória,\n",
    " cantando\n",
    " a uma só voz:",
);

const PASCOA_I_DIRECTIVES: &str = concat!(
    "Na verdade, é digno e (directive in the middle) justo,\n",
    " é nosso dever e salvação (second directive in the same sentence) proclamar vossa glória, ó Pai, em todo tempo, (directive at the end of a firsts)\n",
    " mas, com maior júbilo, louvar-vos nesta noite, ( neste dia ou neste tempo )\n",
    " porque Cristo, nossa Páscoa, foi imolado.\n",
    "\n",
    " É ele o verdadeiro Cordeiro, que tirou o pecado do mundo;\n",
    " morrendo, destruiu a nossa morte\n",
    " e, ressurgindo, restaurou a vida.\n",
    "\n",
    " Por isso,\n",
    " transbordando de alegria pascal, exulta a criação por toda a terra;\n",
    " também as Virtudes celestes e as Potestades angélicas proclamam um hino à vossa glória,\n",
    " cantando\n",
    " a uma só voz:",
);

const SOLEMN_DIALOGUE: &str = "<c><sp>V/</sp></c> O(f) Se(g)nhor(h) es(h)te(h)ja(f) con(g)vos(hg)co.(g) (::) <c><sp>R/</sp></c> E(f)<e>le</e> es(g)tá(h) no(h) me(h)io(f) de(g) nós.(hg) (::) (Z) <c><sp>V/</sp></c> Co(g)ra(h)ções(i) ao(h) al(gh)to.(gf) (::) <c><sp>R/</sp></c> O(h) nos(h)so(h) co(g)ra(h)cão(i) es(h)tá(g) em(h) Deus.(gf) (::) (Z) <c><sp>V/</sp></c> De(hg)mos(f) gra(fg)ças(h) ao(g) Se(h)nhor(ih) nos(gf)so(gh) Deus.(ghg) (::) <c><sp>R/</sp></c> É(g) no(g)sso(g) de(h)ver(i) e(h) nos(h)sa(g) sal(h)va(g)ção.(gf) (::) (Z)";

const PASCOA_I_BODY: &str = concat!(
    "<c><sp>V/</sp></c> Na(f) ver(h)da(h)de,(h) é(h) dig(h)no(g) e(gf) jus(fg)to,(g) (;)\n",
    "é(f) nos(h)so(h) de(h)ver(h) e(h) sal(h)va(h)ção(h) pro(h)cla(h)mar(h) vos(h)sa(h) gló(h)ria,(h) ó(h) Pai,(h) em(h) to(h)do(gf) tem(fg)po,(g) (;)\n",
    "mas,(g) com(g) mai(g)or(g) jú(g)bi(g)lo,(g) lou(g)var(g)-vos(g) nes(f)ta(g) noi(h)te,(g) ||<i><c> neste dia ou neste tempo </c></i>||(,)\n",
    "por(g)que(g) Cris(g)to,(g) nos(g)sa(g) Pás(g)coa,(g) foi(fe) i(ef)mo(g)la(fg)do.(f) (:)(Z)\n",
    "\n",
    "É(f) e(h)le(h) o(h) ver(h)da(h)dei(h)ro(h) Cor(h)dei(h)ro,(h) que(h) ti(h)rou(h) o(h) pe(h)ca(h)do(g) do(gf) mun(fg)do;(g) (;)\n",
    "mor(g)ren(g)do,(g) des(g)tru(g)iu(g) a(g) nos(f)sa(g) mor(h)te(g) (,)\n",
    "e,(g) res(g)sur(g)gin(g)do,(g) res(g)tau(fe)rou(ef) a(g) vi(fg)da.(f) (:)(Z)\n",
    "\n",
    "Por(f) is(ef)so,(f) (,)\n",
    "trans(f)bor(h)dan(h)do(h) de(h) a(h)le(h)gri(h)a(h) pas(h)cal,(h) e(h)xul(h)ta(h) a(h) cri(h)a(h)ção(h) por(h) to(h)da(g) a(gf) ter(fg)ra;(g) (;)\n",
    "tam(f)bém(h) as(h) Vir(h)tu(h)des(h) ce(h)les(h)tes(h) e(h) as(h) Po(h)tes(h)ta(h)des(h) an(h)gé(h)li(h)cas(h) pro(h)cla(h)mam(h) um(h) hi(h)no(h) à(h) vos(h)sa(gf) gló(fg)ria,(g) (;)\n",
    "can(g)tan(fgh)do(g) (,)\n",
    "a(g) u(fe)ma(ef) só(g) voz:(fgf) (::)",
);

const PASCOA_I_DIRECTIVES_BODY: &str = concat!(
    "<c><sp>V/</sp></c> Na(f) ver(h)da(h)de,(h) é(h) dig(h)no(g) e(gf) ||<i><c>directive in the middle</c></i>||(,) jus(fg)to,(g) (;)\n",
    "é(f) nos(h)so(h) de(h)ver(h) e(h) sal(h)va(h)ção(h) ||<i><c>second directive in the same sentence</c></i>||(,) pro(h)cla(h)mar(h) vos(h)sa(h) gló(h)ria,(h) ó(h) Pai,(h) em(h) to(h)do(gf) tem(fg)po,(g) ||<i><c>directive at the end of a firsts</c></i>||(;)\n",
    "mas,(g) com(g) mai(g)or(g) jú(g)bi(g)lo,(g) lou(g)var(g)-vos(g) nes(f)ta(g) noi(h)te,(g) ||<i><c> neste dia ou neste tempo </c></i>||(,)\n",
    "por(g)que(g) Cris(g)to,(g) nos(g)sa(g) Pás(g)coa,(g) foi(fe) i(ef)mo(g)la(fg)do.(f) (:)(Z)\n",
    "\n",
    "É(f) e(h)le(h) o(h) ver(h)da(h)dei(h)ro(h) Cor(h)dei(h)ro,(h) que(h) ti(h)rou(h) o(h) pe(h)ca(h)do(g) do(gf) mun(fg)do;(g) (;)\n",
    "mor(g)ren(g)do,(g) des(g)tru(g)iu(g) a(g) nos(f)sa(g) mor(h)te(g) (,)\n",
    "e,(g) res(g)sur(g)gin(g)do,(g) res(g)tau(fe)rou(ef) a(g) vi(fg)da.(f) (:)(Z)\n",
    "\n",
    "Por(f) is(ef)so,(f) (,)\n",
    "trans(f)bor(h)dan(h)do(h) de(h) a(h)le(h)gri(h)a(h) pas(h)cal,(h) e(h)xul(h)ta(h) a(h) cri(h)a(h)ção(h) por(h) to(h)da(g) a(gf) ter(fg)ra;(g) (;)\n",
    "tam(f)bém(h) as(h) Vir(h)tu(h)des(h) ce(h)les(h)tes(h) e(h) as(h) Po(h)tes(h)ta(h)des(h) an(h)gé(h)li(h)cas(h) pro(h)cla(h)mam(h) um(h) hi(h)no(h) à(h) vos(h)sa(gf) gló(fg)ria,(g) (;)\n",
    "can(g)tan(fgh)do(g) (,)\n",
    "a(g) u(fe)ma(ef) só(g) voz:(fgf) (::)",
);

fn pascoa_mock() -> Arc<MockSyllabifier> {
    Arc::new(MockSyllabifier::new(PASCOA_WORDS.iter().copied()))
}

fn expected(body: &str) -> String {
    format!("{SOLEMN_DIALOGUE}\n\n{body}")
}

#[test]
fn easter_preface_matches_golden_score() {
    let gabc = generate("", PASCOA_I, pascoa_mock()).unwrap();
    assert_eq!(gabc, expected(PASCOA_I_BODY));
}

#[test]
fn easter_preface_with_directives_matches_golden_score() {
    let gabc = generate("solemn", PASCOA_I_DIRECTIVES, pascoa_mock()).unwrap();
    assert_eq!(gabc, expected(PASCOA_I_DIRECTIVES_BODY));
}

#[test]
fn piece_ends_with_double_bar() {
    let gabc = generate("", PASCOA_I, pascoa_mock()).unwrap();
    assert!(gabc.ends_with("(::)"));
    assert!(!gabc.ends_with("(:)(Z)\n\n"));
    // paragraphs in between keep their whole bar and break
    assert_eq!(gabc.matches("(:)(Z)\n\n").count(), 2);
}

#[test]
fn dictionary_store_reproduces_golden_score() {
    let dir = std::env::temp_dir().join(format!("gabc-preface-golden-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let entries: serde_json::Map<String, serde_json::Value> = PASCOA_WORDS
        .iter()
        .map(|(w, s, t)| (w.to_string(), serde_json::json!({ "slashed": s, "tonic_index": t })))
        .collect();
    std::fs::write(dir.join(LITURGICAL_FILE), serde_json::to_string(&entries).unwrap()).unwrap();

    let store = DictionarySyllabifier::new(StorePaths::in_dir(&dir)).with_fallback(false);
    gabc_core::Syllabifier::load(&store).unwrap();
    let gabc = Generator::new(Arc::new(store)).generate("", PASCOA_I).unwrap();
    assert_eq!(gabc, expected(PASCOA_I_BODY));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn marked_firsts_phrase_keeps_punctuation_marks() {
    let mock = Arc::new(MockSyllabifier::with_defaults());
    let opts = GenerateOptions { dialogue: DialogueMode::Solemn, layout: Layout::Marked };
    let preface = Generator::new(mock).compose(&opts, "-Na: verd'ade, é .digno e justo,=", &Deadline::none()).unwrap();

    assert_eq!(preface.phrases.len(), 1);
    assert_eq!(preface.phrases[0].role, Role::Firsts);
    assert_eq!(
        preface.gabc,
        format!(
            "{SOLEMN_DIALOGUE}\n\n<c><sp>V/</sp></c> -Na:(f) ver(h)d'a(h)de,(h) é(h) .dig(h)no(g) e(gf) jus(fg)to,(g) (;)"
        )
    );
}

#[test]
fn marked_layout_ignores_paragraph_sizes() {
    let mock = Arc::new(MockSyllabifier::with_defaults());
    let opts = GenerateOptions { dialogue: DialogueMode::Solemn, layout: Layout::Marked };
    let text = "Na verdade, é digno e justo=\nPor isso+\nCristo Senhor nosso//";
    let preface = Generator::new(mock).compose(&opts, text, &Deadline::none()).unwrap();

    let roles: Vec<Role> = preface.phrases.iter().map(|t| t.role).collect();
    assert_eq!(roles, vec![Role::Firsts, Role::Conclusion, Role::Last]);
    assert!(preface.gabc.ends_with("(::)"));
}

#[test]
fn marked_layout_requires_marks() {
    let mock = Arc::new(MockSyllabifier::with_defaults());
    let opts = GenerateOptions { dialogue: DialogueMode::Solemn, layout: Layout::Marked };
    let err = Generator::new(mock).compose(&opts, "Na verdade", &Deadline::none()).unwrap_err();
    assert!(matches!(err, GabcError::NoMarks(ref line) if line == "Na verdade"));
}

#[test]
fn single_line_is_a_short_paragraph() {
    let err = generate("", "Na verdade, é digno e justo,", Arc::new(MockSyllabifier::with_defaults())).unwrap_err();
    assert!(matches!(err, GabcError::ShortParagraph(_)));
    assert_eq!(err.code(), 101);
}

#[test]
fn two_phrases_fail_three_succeed() {
    let mock = Arc::new(MockSyllabifier::with_defaults());
    let g = Generator::new(mock);

    let two = "Na verdade, é digno e justo,\nCristo Senhor nosso.";
    assert!(matches!(g.generate("", two).unwrap_err(), GabcError::ShortParagraph(_)));

    let three = "Na verdade, é digno e justo,\né digno e justo,\nCristo Senhor nosso.";
    let gabc = g.generate("", three).unwrap();
    assert!(gabc.ends_with("(::)"));
}

#[test]
fn every_letter_survives_composition() {
    let gabc = generate("", PASCOA_I, pascoa_mock()).unwrap();
    let body = gabc.split_once("\n\n").unwrap().1;
    let body = body
        .strip_prefix("<c><sp>V/</sp></c> ")
        .unwrap()
        .replace("||<i><c> neste dia ou neste tempo </c></i>||", "");

    let mut sung = String::new();
    let mut depth = 0;
    for c in body.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && !c.is_whitespace() => sung.push(c),
            _ => {}
        }
    }
    let input: String = PASCOA_I
        .replace("( neste dia ou neste tempo )", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    assert_eq!(sung, input);
}

#[test]
fn regional_dialogue_opens_the_score() {
    let gabc = generate("regional", PASCOA_I, pascoa_mock()).unwrap();
    assert!(gabc.starts_with(DialogueMode::Regional.gabc()));
    assert!(gabc.ends_with(PASCOA_I_BODY));
}

#[test]
fn unbalanced_directive_fails() {
    let text = "Na verdade (sem fim,\né digno e justo,\nCristo Senhor nosso.";
    let err = generate("", text, Arc::new(MockSyllabifier::with_defaults())).unwrap_err();
    assert!(matches!(err, GabcError::UnbalancedDirective(_)));
}

#[test]
fn unknown_word_names_the_word() {
    let text = "Na verdade, é digno e justo,\né digno e justo,\nAleluia.";
    let err = generate("", text, Arc::new(MockSyllabifier::with_defaults())).unwrap_err();
    match err {
        GabcError::Syllabifier { word, .. } => assert_eq!(word, "Aleluia."),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn cancelled_request_times_out() {
    let deadline = Deadline::none();
    deadline.cancel();
    let err = Generator::new(pascoa_mock())
        .compose(&GenerateOptions::default(), PASCOA_I, &deadline)
        .unwrap_err();
    assert!(matches!(err, GabcError::Timeout));
    assert_eq!(err.code(), 201);
}

#[test]
fn learned_words_are_saved_once_per_request() {
    let mock = pascoa_mock();
    generate("", PASCOA_I, mock.clone()).unwrap();
    assert_eq!(mock.saves(), 1);
}

#[test]
fn nothing_is_saved_when_syllabification_fails() {
    let mock = Arc::new(MockSyllabifier::with_defaults());
    generate("", "Aleluia", mock.clone()).unwrap_err();
    assert_eq!(mock.saves(), 0);
}

#[test]
fn handler_round_trips_wire_types() {
    let req: PrefaceRequest = serde_json::from_str(&format!(
        r#"{{"dialogue": "regional", "text": {}}}"#,
        serde_json::to_string(PASCOA_I).unwrap()
    ))
    .unwrap();
    assert_eq!(req.layout, Layout::Positional);

    let resp = handle_preface(&Generator::new(pascoa_mock()), &req, &Deadline::none()).unwrap();
    assert!(resp.gabc.starts_with(DialogueMode::Regional.gabc()));

    let json = serde_json::to_value(&resp).unwrap();
    let back: PrefaceResponse = serde_json::from_value(json).unwrap();
    assert_eq!(back, resp);
}
