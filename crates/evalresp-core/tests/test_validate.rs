//! Stage validation tests

use num_complex::Complex64;

use evalresp_core::error::ValidationError;
use evalresp_core::frequency::FrequencyUnit;
use evalresp_core::response::{
    Coefficient, Coefficients, Decimation, PhaseUnit, PoleZero, ResponseDescriptor, ResponseList,
    Stage, TransferType, Unit, UnitKind,
};
use evalresp_core::validate;

fn seismometer() -> Stage {
    Stage::new(
        1,
        TransferType::Laplace,
        Unit::si(UnitKind::Velocity),
        Unit::si(UnitKind::Volts),
    )
    .with_filter(PoleZero {
        poles: vec![Complex64::new(-4.44, 4.44), Complex64::new(-4.44, -4.44)],
        zeros: vec![Complex64::new(0.0, 0.0); 2],
    })
    .with_normalization(1.0, 1.0)
    .with_gain(400.0, 1.0)
}

fn digitiser() -> Stage {
    Stage::new(
        2,
        TransferType::Digital,
        Unit::si(UnitKind::Volts),
        Unit::si(UnitKind::Counts),
    )
    .with_gain(1e6, 0.0)
    .with_decimation(Decimation::new(100.0, 1))
}

fn table() -> ResponseList {
    ResponseList {
        frequency: vec![1.0, 2.0],
        amplitude: vec![1.0, 1.0],
        phase: vec![0.0, 0.0],
        ..Default::default()
    }
}

#[test]
fn test_valid_cascade() {
    let resp = ResponseDescriptor::new(vec![seismometer(), digitiser()]);
    assert!(validate(&resp, false).is_ok());
}

#[test]
fn test_pole_zero_without_normalization() {
    let mut seis = seismometer();
    seis.normalization = None;
    let resp = ResponseDescriptor::new(vec![seis, digitiser()]);
    assert_eq!(
        validate(&resp, false).unwrap_err(),
        ValidationError::MissingNormalization { stage: 1 }
    );
}

#[test]
fn test_cascade_stage_without_gain() {
    let mut adc = digitiser();
    adc.gain = Some(evalresp_core::response::Gain::new(-1.0, -1.0));
    adc.filter = Some(Coefficients::fir(vec![Coefficient::from(1.0)]).into());
    let resp = ResponseDescriptor::new(vec![seismometer(), adc]);
    assert_eq!(
        validate(&resp, false).unwrap_err(),
        ValidationError::MissingStageGain { stage: 2 }
    );
}

#[test]
fn test_response_list_must_be_alone() {
    let list = Stage::new(
        1,
        TransferType::Analog,
        Unit::si(UnitKind::Velocity),
        Unit::si(UnitKind::Volts),
    )
    .with_filter(table())
    .with_gain(1.0, 1.0);
    let resp = ResponseDescriptor::new(vec![list.clone(), digitiser()]);
    assert_eq!(
        validate(&resp, false).unwrap_err(),
        ValidationError::ListNotSole { stage: 1 }
    );

    assert!(validate(&ResponseDescriptor::new(vec![list]), false).is_ok());
}

#[test]
fn test_response_list_units() {
    let mut list = table();
    list.frequency_unit = FrequencyUnit::RadiansPerSecond;
    let stage = Stage::new(1, TransferType::Analog, Unit::default(), Unit::default())
        .with_filter(list)
        .with_gain(1.0, 1.0);
    assert_eq!(
        validate(&ResponseDescriptor::new(vec![stage]), false).unwrap_err(),
        ValidationError::ListFrequencyUnit {
            stage: 1,
            unit: FrequencyUnit::RadiansPerSecond,
        }
    );

    let mut list = table();
    list.phase_unit = PhaseUnit::Other;
    let stage = Stage::new(1, TransferType::Analog, Unit::default(), Unit::default())
        .with_filter(list)
        .with_gain(1.0, 1.0)
        .with_normalization(1.0, 1.0);
    assert_eq!(
        validate(&ResponseDescriptor::new(vec![stage]), false).unwrap_err(),
        ValidationError::ListWithNormalization { stage: 1 }
    );
}

#[test]
fn test_digital_fir_without_decimation() {
    let fir = Stage::new(
        3,
        TransferType::Digital,
        Unit::si(UnitKind::Counts),
        Unit::si(UnitKind::Counts),
    )
    .with_filter(Coefficients::fir(vec![Coefficient::from(1.0)]))
    .with_gain(1.0, 0.0);
    let resp = ResponseDescriptor::new(vec![seismometer(), digitiser(), fir]);
    assert_eq!(
        validate(&resp, false).unwrap_err(),
        ValidationError::MissingDecimation { stage: 3 }
    );
}

#[test]
fn test_error_messages_name_the_stage() {
    let mut adc = digitiser();
    adc.input_units = Unit::new(UnitKind::Volts, -3);
    let resp = ResponseDescriptor::new(vec![seismometer(), adc]);
    let err = validate(&resp, false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "stage 2: input units Volts(1e-3) do not match previous output units Volts"
    );
}
